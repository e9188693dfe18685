//! Edge detection against an in-process HTTP responder.

use citra_api_client::{ApiError, ClientConfig, EdgeServiceClient, RemoteEdgeDetector};
use citra_image::{codec, EdgeDetector, EdgeMethod, EdgeSource, PixelBuffer};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Accept one connection, answer it with the given status and body, and hand
/// back the raw request bytes.
async fn serve_once(status_line: &'static str, body: Vec<u8>) -> (String, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        respond(&mut socket, status_line, &body).await;
        request
    });
    (format!("http://{addr}"), handle)
}

async fn respond(socket: &mut TcpStream, status_line: &str, body: &[u8]) {
    let head = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: image/png\r\nContent-Length: {}\r\n\
         Connection: close\r\n\r\n",
        body.len()
    );
    socket.write_all(head.as_bytes()).await.unwrap();
    socket.write_all(body).await.unwrap();
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(header_end) = find(&buf, b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let content_length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok());
        match content_length {
            Some(len) if buf.len() >= header_end + 4 + len => break,
            None if buf.ends_with(b"0\r\n\r\n") => break,
            _ => {}
        }
    }
    buf
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn client(base_url: &str) -> EdgeServiceClient {
    EdgeServiceClient::with_config(ClientConfig::default().with_base_url(base_url)).unwrap()
}

fn edge_map() -> PixelBuffer {
    PixelBuffer::new(2, 2, vec![0, 0, 0, 255, 255, 255, 255, 255, 255, 255, 255, 255, 0, 0, 0, 255])
        .unwrap()
}

#[tokio::test]
async fn posts_multipart_image_and_decodes_png() {
    let expected = edge_map();
    let (base_url, server) = serve_once("200 OK", codec::encode_png(&expected).unwrap()).await;

    let upload = b"GIF89a-original-upload-bytes".to_vec();
    let result = client(&base_url)
        .edges()
        .detect(upload, EdgeMethod::FreiChen)
        .await
        .unwrap();
    assert_eq!(result, expected);

    let request = server.await.unwrap();
    let text = String::from_utf8_lossy(&request);
    assert!(text.starts_with("POST /edge/frei-chen HTTP/1.1"));
    assert!(text.to_ascii_lowercase().contains("x-request-id:"));
    assert!(text.contains("name=\"image\""));
    assert!(text.contains("filename=\"image.gif\""));
    assert!(text.contains("GIF89a-original-upload-bytes"));
}

#[tokio::test]
async fn non_success_status_is_an_edge_request_error() {
    let (base_url, server) =
        serve_once("503 Service Unavailable", b"model warming up".to_vec()).await;

    let err = client(&base_url)
        .edges()
        .detect(b"\x89PNG\r\n\x1a\n".to_vec(), EdgeMethod::Roberts)
        .await
        .unwrap_err();
    server.await.unwrap();

    match err {
        ApiError::EdgeDetectionRequest { method, status, message } => {
            assert_eq!(method, EdgeMethod::Roberts);
            assert_eq!(status, 503);
            assert_eq!(message, "model warming up");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_an_invalid_response() {
    let (base_url, server) = serve_once("200 OK", b"this is not a png".to_vec()).await;

    let err = client(&base_url)
        .edges()
        .detect(vec![1, 2, 3], EdgeMethod::Sobel)
        .await
        .unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, ApiError::InvalidResponse(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .edges()
        .detect(vec![0; 8], EdgeMethod::Prewitt)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Transport { method: EdgeMethod::Prewitt, .. }));
}

#[tokio::test]
async fn remote_detector_uploads_png_when_no_original_bytes() {
    let expected = edge_map();
    let (base_url, server) = serve_once("200 OK", codec::encode_png(&expected).unwrap()).await;

    let detector = RemoteEdgeDetector::new(client(&base_url));
    let pixels = PixelBuffer::filled(3, 3, [40, 80, 120, 255]).unwrap();
    let result = detector
        .detect_edges(EdgeSource::new(&pixels), EdgeMethod::Laplace)
        .await
        .unwrap();
    assert_eq!(result, expected);

    let request = server.await.unwrap();
    let text = String::from_utf8_lossy(&request);
    assert!(text.starts_with("POST /edge/laplace HTTP/1.1"));
    assert!(text.contains("filename=\"image.png\""));
    assert!(text.contains("content-type: image/png") || text.contains("Content-Type: image/png"));
}

#[tokio::test]
async fn remote_detector_forwards_original_bytes() {
    let expected = edge_map();
    let (base_url, server) = serve_once("200 OK", codec::encode_png(&expected).unwrap()).await;

    let detector = RemoteEdgeDetector::new(client(&base_url));
    let pixels = PixelBuffer::filled(1, 1, [0, 0, 0, 255]).unwrap();
    let original = b"\xFF\xD8\xFF\xE0jpeg-bytes".to_vec();
    detector
        .detect_edges(EdgeSource::new(&pixels).with_encoded(&original), EdgeMethod::Sobel)
        .await
        .unwrap();

    let request = server.await.unwrap();
    let text = String::from_utf8_lossy(&request);
    assert!(text.contains("filename=\"image.jpg\""));
    assert!(text.contains("jpeg-bytes"));
}

#[tokio::test]
async fn remote_detector_clones_never_overlap_requests() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let png = codec::encode_png(&edge_map()).unwrap();

    // Holds the first reply back and reports whether a second connection
    // turned up while it was still outstanding.
    let server = tokio::spawn(async move {
        let (mut first, _) = listener.accept().await.unwrap();
        read_request(&mut first).await;
        let early = tokio::time::timeout(Duration::from_millis(300), listener.accept()).await;
        let overlapped = early.is_ok();
        respond(&mut first, "200 OK", &png).await;
        drop(first);

        let mut second = match early {
            Ok(accepted) => accepted.unwrap().0,
            Err(_) => listener.accept().await.unwrap().0,
        };
        read_request(&mut second).await;
        respond(&mut second, "200 OK", &png).await;
        overlapped
    });

    let detector = RemoteEdgeDetector::new(client(&format!("http://{addr}")));
    let twin = detector.clone();
    let pixels = PixelBuffer::filled(3, 3, [10, 20, 30, 255]).unwrap();
    let (a, b) = tokio::join!(
        detector.detect_edges(EdgeSource::new(&pixels), EdgeMethod::Sobel),
        twin.detect_edges(EdgeSource::new(&pixels), EdgeMethod::Prewitt),
    );
    assert_eq!(a.unwrap(), edge_map());
    assert_eq!(b.unwrap(), edge_map());

    let overlapped = server.await.unwrap();
    assert!(!overlapped, "second request connected before the first was answered");
}
