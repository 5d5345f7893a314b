//! Minimal HTTP/1.1 server for exercising the checker without network
//! access. Answers each connection with one canned response, then closes it.

use std::io;
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

type Route = dyn Fn(&RecordedRequest) -> Reply + Send + Sync;

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub path: String,
    /// Lowercased names, in arrival order.
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn parse(head: &str) -> Self {
        let mut lines = head.split("\r\n");
        let path = lines
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .unwrap_or("/")
            .to_string();

        let headers = lines
            .take_while(|line| !line.is_empty())
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
            .collect();

        RecordedRequest { path, headers }
    }
}

pub struct Reply {
    status: u16,
    headers: Vec<(String, String)>,
    delay: Option<Duration>,
}

impl Reply {
    pub fn status(status: u16) -> Self {
        Reply {
            status,
            headers: Vec::new(),
            delay: None,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = format!("HTTP/1.1 {} Test\r\n", self.status);
        for (name, value) in self.headers.iter() {
            out.push_str(&format!("{}: {}\r\n", name, value));
        }
        out.push_str("Content-Length: 0\r\nConnection: close\r\n\r\n");
        out.into_bytes()
    }
}

pub struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestServer {
    /// Starts serving on an ephemeral localhost port from a background
    /// thread. The server lives until the test process exits.
    pub fn start<F>(route: F) -> Self
    where
        F: Fn(&RecordedRequest) -> Reply + Send + Sync + 'static,
    {
        let route: Arc<Route> = Arc::new(route);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let (addr_tx, addr_rx) = mpsc::channel();

        let recorded = requests.clone();
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Unable to create a runtime");

            runtime.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("Unable to bind test server");
                addr_tx
                    .send(listener.local_addr().expect("No local address"))
                    .expect("Test server address not received");

                while let Ok((socket, _)) = listener.accept().await {
                    tokio::spawn(handle_connection(socket, route.clone(), recorded.clone()));
                }
            });
        });

        let addr = addr_rx.recv().expect("Test server failed to start");
        TestServer { addr, requests }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle_connection(
    mut socket: TcpStream,
    route: Arc<Route>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
) -> Result<(), io::Error> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let nread = socket.read(&mut buf).await?;
        if nread == 0 {
            return Ok(());
        }
        head.extend_from_slice(&buf[..nread]);
    }

    let request = RecordedRequest::parse(&String::from_utf8_lossy(&head));
    requests.lock().unwrap().push(request.clone());

    let reply = route(&request);
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    socket.write_all(&reply.to_bytes()).await?;
    socket.shutdown().await
}
