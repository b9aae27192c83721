//! Client-facing text.
//!
//! Every message starts and ends with a newline so it reads as its own
//! paragraph in a raw terminal session.

/// Sent once after a connection is accepted.
pub const WELCOME_PROMPT: &str = "\nHello, this is Array Addition Server!\n";

/// Asks for the first operand.
pub const FIRST_ARRAY_PROMPT: &str = "\nPlease enter the first array for addition:\n";

/// Asks for the second operand.
pub const SECOND_ARRAY_PROMPT: &str = "\nPlease enter the second array for addition:\n";

/// Precedes the formatted sum.
pub const RESULT_PROMPT: &str = "\nThe result of array addition are given below:\n";

/// Sent before the connection is closed.
pub const GOODBYE_PROMPT: &str = "\nThank you for Array Addition Server! Good Bye!\n";

/// The input line exceeded the frame size; the excess was discarded.
pub const INPUT_OVERFLOW_WARNING: &str =
    "\nWARNING: Input overflow detected, discarding extra bytes.\n";

/// The formatted sum exceeded the line size; trailing digits were dropped.
pub const OUTPUT_OVERFLOW_WARNING: &str =
    "\nWARNING: Output overflow detected, discarding extra bytes.\n";

/// A token was not an integer.
pub const INVALID_CONTENT_ERROR: &str = "\nERROR: The inputted integer array contains non-integer characters. You must input only integers and empty spaces to separate inputted integers!\n";

/// The two arrays had different lengths.
pub const LENGTH_MISMATCH_ERROR: &str = "\nERROR: The number of integers are different for both arrays. You must send equal number of integers for both arrays!\n";

/// The line held no integers.
pub const EMPTY_ARRAY_ERROR: &str =
    "\nERROR: The inputted integer array is empty. You must input at least one integer!\n";
