//! # End-to-End Sessions
//!
//! A real `AdditionServer` bound to an ephemeral loopback port, driven by a
//! plain `TcpStream` client that writes a whole script, half-closes and reads
//! everything the server sent.

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::time::Duration;

    use aas_engine::Backend;
    use aas_server::prompts::{
        FIRST_ARRAY_PROMPT, GOODBYE_PROMPT, INPUT_OVERFLOW_WARNING, INVALID_CONTENT_ERROR,
        LENGTH_MISMATCH_ERROR, OUTPUT_OVERFLOW_WARNING, RESULT_PROMPT, SECOND_ARRAY_PROMPT,
        WELCOME_PROMPT,
    };
    use aas_server::{AdditionServer, ServerConfig, ServerStats};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::task::JoinHandle;
    use tokio::time::timeout;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const DEADLINE: Duration = Duration::from_secs(10);

    async fn start(
        config: ServerConfig,
    ) -> (SocketAddr, JoinHandle<Result<ServerStats, aas_server::ServerError>>) {
        let server = AdditionServer::bind(config).await.unwrap();
        let addr = server.local_addr().unwrap();
        (addr, tokio::spawn(server.run()))
    }

    fn config_for(backend: Backend) -> ServerConfig {
        let mut config = ServerConfig::for_testing();
        config.engine.backend = backend;
        config
    }

    async fn converse(addr: SocketAddr, script: &[u8]) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(script).await.unwrap();
        stream.shutdown().await.unwrap();

        let mut transcript = String::new();
        timeout(DEADLINE, stream.read_to_string(&mut transcript))
            .await
            .expect("server did not close the connection")
            .unwrap();
        transcript
    }

    fn result_line(transcript: &str) -> &str {
        let start = transcript.find(RESULT_PROMPT).expect("no result prompt") + RESULT_PROMPT.len();
        let rest = &transcript[start..];
        &rest[..rest.find('\n').expect("unterminated result") + 1]
    }

    // =============================================================================
    // DIALOGUE
    // =============================================================================

    #[tokio::test]
    async fn test_full_transcript_both_backends() {
        for backend in [Backend::Cpu, Backend::Threads] {
            let (addr, server) = start(config_for(backend)).await;
            let transcript = converse(addr, b"1 2 3\n4 5 6\n").await;

            let expected = [
                WELCOME_PROMPT,
                FIRST_ARRAY_PROMPT,
                SECOND_ARRAY_PROMPT,
                RESULT_PROMPT,
                "5 7 9\n",
                GOODBYE_PROMPT,
            ]
            .concat();
            assert_eq!(transcript, expected, "backend {}", backend);

            let stats = server.await.unwrap().unwrap();
            assert_eq!(stats.completed, 1);
        }
    }

    #[tokio::test]
    async fn test_carry_scenarios() {
        let cases: [(&[u8], &str); 4] = [
            (b"999 999\n0 1\n", "1 0 0\n"),
            (b"0\n0\n", "0\n"),
            (b"500\n500\n", "1 0\n"),
            (b"1 998 999\n0 1 1\n", "2 0 0\n"),
        ];

        let mut config = ServerConfig::for_testing();
        config.max_sessions = cases.len();
        let (addr, server) = start(config).await;

        for (script, sum) in cases {
            let transcript = converse(addr, script).await;
            assert_eq!(result_line(&transcript), sum);
        }

        let stats = server.await.unwrap().unwrap();
        assert_eq!(stats.completed, cases.len());
    }

    #[tokio::test]
    async fn test_recovers_from_bad_input() {
        let (addr, server) = start(ServerConfig::for_testing()).await;
        let transcript = converse(addr, b"1 two 3\n  7   8 \n1\n1 1\n").await;

        assert!(transcript.contains(INVALID_CONTENT_ERROR));
        assert!(transcript.contains(LENGTH_MISMATCH_ERROR));
        assert_eq!(result_line(&transcript), "8 9\n");
        assert_eq!(server.await.unwrap().unwrap().completed, 1);
    }

    #[tokio::test]
    async fn test_out_of_range_value_is_named() {
        let (addr, server) = start(ServerConfig::for_testing()).await;
        let transcript = converse(addr, b"1000\n").await;

        assert!(transcript.contains("1000"));
        assert!(!transcript.contains(RESULT_PROMPT));
        assert_eq!(server.await.unwrap().unwrap().disconnected, 1);
    }

    // =============================================================================
    // LIMITS
    // =============================================================================

    #[tokio::test]
    async fn test_widest_operands_that_fit_a_line() {
        // 24 three-digit values: 95 bytes plus the newline.
        let line = format!("{}\n", vec!["999"; 24].join(" "));
        let script = format!("{}{}", line, line);

        let (addr, server) = start(ServerConfig::for_testing()).await;
        let transcript = converse(addr, script.as_bytes()).await;

        let sum = result_line(&transcript);
        assert!(sum.starts_with("1 999 "));
        assert!(sum.ends_with(" 998\n"));
        assert_eq!(sum.split(' ').count(), 25);
        assert!(!transcript.contains(OUTPUT_OVERFLOW_WARNING));
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_long_line_is_cut_and_warned() {
        let long = format!("{}\n", vec!["1"; 80].join(" "));
        let mut config = ServerConfig::for_testing();
        config.limits.max_line_bytes = 20;
        let (addr, server) = start(config).await;

        // 19-byte frames keep "1 1 1 1 1 1 1 1 1 1" (ten digits).
        let script = format!("{}{}", long, long);
        let transcript = converse(addr, script.as_bytes()).await;

        assert!(transcript.contains(INPUT_OVERFLOW_WARNING));
        assert_eq!(result_line(&transcript), "2 2 2 2 2 2 2 2 2 2\n");
        server.await.unwrap().unwrap();
    }

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_shutdown_between_sessions() {
        let mut config = ServerConfig::for_testing();
        config.max_sessions = 0;
        let mut server = AdditionServer::bind(config).await.unwrap();
        let addr = server.local_addr().unwrap();
        let shutdown = server.shutdown_handle().unwrap();
        let handle = tokio::spawn(server.run());

        let transcript = converse(addr, b"4\n5\n").await;
        assert_eq!(result_line(&transcript), "9\n");

        shutdown.trigger();
        let stats = timeout(DEADLINE, handle).await.unwrap().unwrap().unwrap();
        assert_eq!(stats.sessions, 1);
        assert_eq!(stats.completed, 1);
    }
}
