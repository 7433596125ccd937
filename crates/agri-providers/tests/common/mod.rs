// Servidor HTTP mínimo de una sola petición para probar los clientes sin red.
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

fn header_end(buf: &[u8]) -> Option<usize> {
  buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Responde una vez con `status` y `body`; el handle devuelve la petición
/// recibida (línea, cabeceras y cuerpo) como texto.
pub async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
  let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
  let addr = listener.local_addr().expect("addr");
  let handle = tokio::spawn(async move {
    let (mut sock, _) = listener.accept().await.expect("accept");
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
      let n = sock.read(&mut chunk).await.expect("read");
      if n == 0 {
        break;
      }
      buf.extend_from_slice(&chunk[..n]);
      if let Some(pos) = header_end(&buf) {
        let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
        let len = headers.lines()
                         .find_map(|l| l.strip_prefix("content-length:"))
                         .and_then(|v| v.trim().parse::<usize>().ok())
                         .unwrap_or(0);
        if buf.len() >= pos + 4 + len {
          break;
        }
      }
    }
    let resp = format!("HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                       status,
                       body.len(),
                       body);
    sock.write_all(resp.as_bytes()).await.expect("write");
    let _ = sock.shutdown().await;
    String::from_utf8_lossy(&buf).to_string()
  });
  (format!("http://{}", addr), handle)
}
