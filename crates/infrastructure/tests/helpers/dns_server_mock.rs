#![allow(dead_code)]
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub enum MockRecord {
    A(Ipv4Addr),
    Cname(String),
}

/// Answers keyed by lower-case, fully-qualified query name.
#[derive(Debug, Clone, Default)]
pub struct MockZone {
    records: HashMap<String, Vec<MockRecord>>,
}

impl MockZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn a(mut self, name: &str, ip: &str) -> Self {
        self.records
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(MockRecord::A(ip.parse().unwrap()));
        self
    }

    pub fn cname(mut self, name: &str, target: &str) -> Self {
        self.records
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(MockRecord::Cname(target.to_string()));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    /// UDP replies carry the TC bit and no answers; TCP serves the zone.
    Truncating,
    /// Same as `Truncating` but with nothing listening on TCP.
    TruncatingUdpOnly,
    /// Replies echo a different message ID.
    WrongId,
    /// A reply with a different message ID precedes the real one.
    StaleIdFirst,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<Mutex<Vec<String>>>,
    tcp_queries: Arc<Mutex<Vec<String>>>,
    tasks: Vec<JoinHandle<()>>,
}

impl MockDnsServer {
    pub async fn start(zone: MockZone) -> Result<Self, std::io::Error> {
        Self::start_with_mode(zone, Mode::Normal).await
    }

    pub async fn start_truncating(zone: MockZone) -> Result<Self, std::io::Error> {
        Self::start_with_mode(zone, Mode::Truncating).await
    }

    pub async fn start_truncating_udp_only(zone: MockZone) -> Result<Self, std::io::Error> {
        Self::start_with_mode(zone, Mode::TruncatingUdpOnly).await
    }

    pub async fn start_with_wrong_id(zone: MockZone) -> Result<Self, std::io::Error> {
        Self::start_with_mode(zone, Mode::WrongId).await
    }

    pub async fn start_with_stale_id_first(zone: MockZone) -> Result<Self, std::io::Error> {
        Self::start_with_mode(zone, Mode::StaleIdFirst).await
    }

    async fn start_with_mode(zone: MockZone, mode: Mode) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let zone = Arc::new(zone);
        let queries = Arc::new(Mutex::new(Vec::new()));
        let tcp_queries = Arc::new(Mutex::new(Vec::new()));
        let mut tasks = Vec::new();

        {
            let zone = Arc::clone(&zone);
            let queries = Arc::clone(&queries);
            tasks.push(tokio::spawn(async move {
                let mut buf = vec![0u8; 512];
                loop {
                    let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                        break;
                    };
                    let query = &buf[..len];
                    if let Some((name, _)) = question_name(query) {
                        queries.lock().unwrap().push(name);
                    }
                    let truncated = matches!(mode, Mode::Truncating | Mode::TruncatingUdpOnly);
                    if mode == Mode::StaleIdFirst {
                        let stale = build_response(query, &zone, truncated, true);
                        let _ = socket.send_to(&stale, peer).await;
                    }
                    let wrong_id = mode == Mode::WrongId;
                    let response = build_response(query, &zone, truncated, wrong_id);
                    let _ = socket.send_to(&response, peer).await;
                }
            }));
        }

        if mode == Mode::Truncating {
            let listener = TcpListener::bind(addr).await?;
            let zone = Arc::clone(&zone);
            let tcp_queries = Arc::clone(&tcp_queries);
            tasks.push(tokio::spawn(async move {
                while let Ok((mut stream, _)) = listener.accept().await {
                    let mut len_buf = [0u8; 2];
                    if stream.read_exact(&mut len_buf).await.is_err() {
                        continue;
                    }
                    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                    if stream.read_exact(&mut query).await.is_err() {
                        continue;
                    }
                    if let Some((name, _)) = question_name(&query) {
                        tcp_queries.lock().unwrap().push(name);
                    }
                    let response = build_response(&query, &zone, false, false);
                    let _ = stream
                        .write_all(&(response.len() as u16).to_be_bytes())
                        .await;
                    let _ = stream.write_all(&response).await;
                }
            }));
        }

        Ok(Self {
            addr,
            queries,
            tcp_queries,
            tasks,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Names queried over UDP, in arrival order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn tcp_queries(&self) -> Vec<String> {
        self.tcp_queries.lock().unwrap().clone()
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Decodes the first question name; returns it with the offset just past it.
fn question_name(query: &[u8]) -> Option<(String, usize)> {
    let mut pos = 12;
    let mut name = String::new();
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = query.get(pos..pos + len)?;
        name.push_str(&String::from_utf8_lossy(label).to_ascii_lowercase());
        name.push('.');
        pos += len;
    }
    if name.is_empty() {
        name.push('.');
    }
    Some((name, pos))
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

fn build_response(query: &[u8], zone: &MockZone, truncated: bool, wrong_id: bool) -> Vec<u8> {
    let Some((name, name_end)) = question_name(query) else {
        return vec![];
    };
    let question_end = (name_end + 4).min(query.len());
    let records = zone.records.get(&name);

    let answers: &[MockRecord] = match (truncated, records) {
        (false, Some(records)) => records,
        _ => &[],
    };

    let mut response = Vec::with_capacity(512);

    let id = u16::from_be_bytes([query[0], query[1]]);
    let id = if wrong_id { id.wrapping_add(1) } else { id };
    response.extend_from_slice(&id.to_be_bytes());

    // QR + RD, plus TC when asked
    response.push(if truncated { 0x83 } else { 0x81 });
    // RA, with NXDOMAIN for unknown names
    response.push(if records.is_none() && !truncated { 0x83 } else { 0x80 });

    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);

    response.extend_from_slice(&query[12..question_end]);

    for record in answers {
        // Owner name points back at the question.
        response.extend_from_slice(&[0xc0, 0x0c]);
        match record {
            MockRecord::A(ip) => {
                response.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
                response.extend_from_slice(&60u32.to_be_bytes());
                response.extend_from_slice(&[0x00, 0x04]);
                response.extend_from_slice(&ip.octets());
            }
            MockRecord::Cname(target) => {
                let rdata = encode_name(target);
                response.extend_from_slice(&[0x00, 0x05, 0x00, 0x01]);
                response.extend_from_slice(&60u32.to_be_bytes());
                response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
                response.extend_from_slice(&rdata);
            }
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_name() {
        assert_eq!(
            encode_name("edge.example.com."),
            b"\x04edge\x07example\x03com\x00".to_vec()
        );
    }
}
