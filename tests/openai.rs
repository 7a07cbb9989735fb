use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use persona_chat::{
    config::Config,
    errors::ChatError,
    openai::{ChatApi, ChatMessage, OpenAiClient},
};

/// Serve exactly one HTTP response and hand back the raw request that was received.
fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("listener should bind");
    let url = format!(
        "http://{}/v1/chat/completions",
        listener.local_addr().expect("listener should have an address")
    );
    let response = format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("client should connect");
        let mut reader = BufReader::new(stream.try_clone().expect("stream should clone"));

        let mut head = String::new();
        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("request line should be read");
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().expect("content-length should parse");
                }
            }
            head.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).expect("request body should be read");

        let mut stream = stream;
        stream
            .write_all(response.as_bytes())
            .expect("response should be written");
        head + &String::from_utf8_lossy(&body)
    });

    (url, handle)
}

fn ask(url: &str) -> Result<String, ChatError> {
    let config = Config::with_api_key("sk-test");
    let mut client = OpenAiClient::with_url(&config, url).expect("client should build");
    client.complete(&[
        ChatMessage::new("system", "You are terse."),
        ChatMessage::new("user", "Hi"),
    ])
}

#[test]
fn rejected_key_maps_to_api_error() {
    let (url, server) = serve_once(
        "401 Unauthorized",
        r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
    );

    let err = ask(&url).unwrap_err();
    let request = server.join().unwrap();

    match err {
        ChatError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("expected an api error, got {other:?}"),
    }
    assert!(request
        .to_ascii_lowercase()
        .contains("authorization: bearer sk-test"));
}

#[test]
fn rate_limit_with_plain_body_keeps_text() {
    let (url, server) = serve_once("429 Too Many Requests", "slow down");

    let err = ask(&url).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, ChatError::Api { status: 429, ref message } if message == "slow down"));
}

#[test]
fn success_returns_first_choice_and_sends_payload() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"id":"chatcmpl-1","choices":[{"index":0,"message":{"role":"assistant","content":"Hello."},"finish_reason":"stop"},{"index":1,"message":{"role":"assistant","content":"Other."},"finish_reason":"stop"}]}"#,
    );

    let reply = ask(&url).unwrap();
    let request = server.join().unwrap();

    assert_eq!(reply, "Hello.");
    assert!(request.starts_with("POST /v1/chat/completions"));
    let payload = &request[request.find("\r\n\r\n").unwrap() + 4..];
    let payload: serde_json::Value = serde_json::from_str(payload).unwrap();
    assert_eq!(payload["model"], "gpt-3.5-turbo");
    assert_eq!(payload["temperature"], 0.0);
    assert_eq!(payload["messages"][0]["content"], "You are terse.");
    assert_eq!(payload["messages"][1]["role"], "user");
}

#[test]
fn no_choices_is_empty_response() {
    let (url, server) = serve_once("200 OK", r#"{"choices":[]}"#);

    let err = ask(&url).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, ChatError::EmptyResponse));
}

#[test]
fn refusal_with_null_content_is_empty_response() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"choices":[{"index":0,"message":{"role":"assistant","content":null,"refusal":"no"},"finish_reason":"stop"}]}"#,
    );

    let err = ask(&url).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, ChatError::EmptyResponse));
}
