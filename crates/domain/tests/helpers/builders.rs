#![allow(dead_code)]
use edgedig_domain::{AnswerRecord, DnsAnswer, DnsServer, DnsServerList};
use std::net::Ipv4Addr;

pub struct ServerListBuilder {
    servers: Vec<DnsServer>,
}

impl ServerListBuilder {
    pub fn new() -> Self {
        Self {
            servers: Vec::new(),
        }
    }

    pub fn server(mut self, host: &str, port: u16) -> Self {
        self.servers.push(DnsServer::new(host, port));
        self
    }

    pub fn cloudflare(self) -> Self {
        self.server("1.1.1.1", 53)
    }

    pub fn google(self) -> Self {
        self.server("8.8.8.8", 53)
    }

    pub fn build(self) -> DnsServerList {
        DnsServerList::from(self.servers)
    }
}

pub struct DnsAnswerBuilder {
    answers: Vec<AnswerRecord>,
}

impl DnsAnswerBuilder {
    pub fn new() -> Self {
        Self {
            answers: Vec::new(),
        }
    }

    pub fn a(mut self, name: &str, address: &str) -> Self {
        let address: Ipv4Addr = address.parse().unwrap();
        self.answers.push(AnswerRecord::a(name, address));
        self
    }

    pub fn cname(mut self, name: &str, target: &str) -> Self {
        self.answers.push(AnswerRecord::cname(name, target));
        self
    }

    pub fn build(self) -> DnsAnswer {
        DnsAnswer::new(self.answers)
    }
}
