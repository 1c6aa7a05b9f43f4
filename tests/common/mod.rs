//! Helpers shared by the integration tests: a fixture site on disk and a
//! minimal static HTTP server to serve it.

#![allow(dead_code)]

use image::{Rgb, RgbImage};
use std::io::{Read as _, Write as _};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

pub const DATA: &str = r#"[
  { "slug": "kiana",  "en": "Kiana Kaslana",  "zh": "琪亚娜" },
  { "slug": "mei",    "en": "Raiden Mei",     "zh": "雷电芽衣" },
  { "slug": "bronya", "en": "Bronya Zaychik" },
  { "slug": "himeko", "en": "Murata Himeko",  "zh": "姬子" }
]"#;

fn write_image(path: &Path) {
    RgbImage::from_pixel(8, 10, Rgb([200, 80, 120]))
        .save(path)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
}

/// A site root laid out the way the gallery's default URLs expect:
///
/// ```text
/// data/characters.json
/// assets/placeholder.png
/// assets/hi3/characters/{kiana.webp, kiana.png, mei.jpg, mei.jpeg,
///                        bronya.webp (corrupt), bronya.png, theresa.png}
/// ```
pub fn fixture_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    std::fs::create_dir_all(root.join("data")).unwrap();
    std::fs::write(root.join("data/characters.json"), DATA).unwrap();

    let dir = root.join("assets/hi3/characters");
    std::fs::create_dir_all(&dir).unwrap();
    write_image(&root.join("assets/placeholder.png"));
    for name in ["kiana.webp", "kiana.png", "mei.jpg", "mei.jpeg", "bronya.png", "theresa.png"] {
        write_image(&dir.join(name));
    }
    std::fs::write(dir.join("bronya.webp"), b"RIFF\0\0\0\0WEBPjunk").unwrap();
    tmp
}

/// Run the binary with a config path that does not exist, so only stock
/// defaults and flags apply.
pub fn run(site: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_valkyrie-gallery"))
        .arg("--config")
        .arg(site.join("no-such-gallery.toml"))
        .args(args)
        .output()
        .expect("failed to run valkyrie-gallery")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ===========================================================================
// Minimal static HTTP server
// ===========================================================================

pub struct TestServer {
    port: u16,
    _stop: std::sync::mpsc::Sender<()>,
}

impl TestServer {
    pub fn start(root: PathBuf) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = std::sync::mpsc::channel::<()>();

        thread::spawn(move || {
            listener.set_nonblocking(true).unwrap();
            loop {
                if rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        let root = root.clone();
                        thread::spawn(move || serve_request(stream, &root));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Self { port, _stop: tx }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }
}

fn serve_request(mut stream: std::net::TcpStream, root: &Path) {
    // Accepted sockets may inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 4096];
    let n = match stream.read(&mut buf) {
        Ok(n) if n > 0 => n,
        _ => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request.split_whitespace().nth(1).unwrap_or("/");
    let rel = path.trim_start_matches('/');
    let file_path = if rel.is_empty() {
        root.join("index.html")
    } else {
        root.join(rel)
    };

    let (status, body, ct) = if file_path.is_file() {
        let body = std::fs::read(&file_path).unwrap_or_default();
        let ext = file_path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let ct = match ext {
            "html" => "text/html; charset=utf-8",
            "js" => "application/javascript",
            "json" => "application/json",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "webp" => "image/webp",
            "avif" => "image/avif",
            _ => "application/octet-stream",
        };
        ("200 OK", body, ct)
    } else {
        ("404 Not Found", b"Not Found".to_vec(), "text/plain")
    };

    let header = format!(
        "HTTP/1.1 {status}\r\n\
         Content-Type: {ct}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&body);
}
