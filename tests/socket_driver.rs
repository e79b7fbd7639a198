use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::thread;

use serde_json::Value;
use site_estimator::logging::MemorySink;
use site_estimator::{Estimator, Logger, SocketDriver};

#[test]
fn answers_each_request_line_over_tcp() {
    let sink = MemorySink::new();
    let logger = Logger::new(sink.clone());
    let mut estimator = Estimator::with_default().with_logger(logger.clone());
    estimator.enable_metrics();
    let driver = SocketDriver::bind("127.0.0.1:0", estimator)
        .unwrap()
        .with_logger(logger);
    let addr = driver.local_addr().unwrap();

    let server = thread::spawn(move || driver.run_once());

    let mut stream = TcpStream::connect(addr).unwrap();
    stream
        .write_all(
            concat!(
                r#"{"area": 1000, "floors": "G+1", "wage": 500, "cost": 2000}"#,
                "\n",
                r#"{"area": 1000, "floors": "G+x", "wage": 500, "cost": 2000}"#,
                "\n",
            )
            .as_bytes(),
        )
        .unwrap();
    stream.shutdown(std::net::Shutdown::Write).unwrap();

    let frames: Vec<Value> = BufReader::new(stream)
        .lines()
        .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
        .collect();
    server.join().unwrap().unwrap();

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0]["ok"], true);
    assert_eq!(frames[0]["estimate"]["duration_days"], 181);
    assert_eq!(frames[1]["ok"], false);
    assert_eq!(frames[1]["error"]["field"], "floors");

    let messages = sink.messages();
    assert!(messages.iter().any(|m| m == "connection_opened"));
    assert!(messages.iter().any(|m| m == "connection_closed"));
    assert!(messages.iter().any(|m| m == "estimator_metrics"));
}

fn exchange(addr: std::net::SocketAddr, payload: &[u8]) -> Vec<Value> {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(payload).unwrap();
    stream.shutdown(std::net::Shutdown::Write).unwrap();
    BufReader::new(stream)
        .lines()
        .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
        .collect()
}

#[test]
fn bad_bytes_do_not_stop_the_listener() {
    let sink = MemorySink::new();
    let driver = SocketDriver::bind("127.0.0.1:0", Estimator::with_default())
        .unwrap()
        .with_logger(Logger::new(sink.clone()));
    let addr = driver.local_addr().unwrap();
    thread::spawn(move || driver.run());

    let mut payload = vec![0xff, 0xfe, b'\n'];
    payload.extend_from_slice(br#"{"area": 50, "floors": "G", "wage": 1, "cost": 1}"#);
    payload.push(b'\n');
    let first = exchange(addr, &payload);
    assert_eq!(first.len(), 2);
    assert_eq!(first[0]["ok"], false);
    assert!(first[0]["error"]["field"].is_null());
    assert_eq!(first[1]["ok"], true);

    let second = exchange(
        addr,
        concat!(r#"{"area": 1000, "floors": "G+1", "wage": 500, "cost": 2000}"#, "\n").as_bytes(),
    );
    assert_eq!(second.len(), 1);
    assert_eq!(second[0]["estimate"]["workers"], 11);
    assert!(sink.messages().iter().any(|m| m == "request_malformed"));
}
