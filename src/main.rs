// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! origin-client CLI
//!
//! Example usage and demonstration of the origin-client library.

use std::env;
use std::process::ExitCode;

use origin_client::{RequestOptions, Session};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("origin_client=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "get" | "post" => {
            if args.len() < 4 {
                eprintln!("Usage: origin-client {} <origin> <target> [key=value ...]", args[1]);
                return ExitCode::from(1);
            }
            send(&args[1], &args[2], &args[3], &args[4..]).await
        }
        #[cfg(feature = "websocket")]
        "ws" => {
            if args.len() < 4 {
                eprintln!("Usage: origin-client ws <origin> <target> [key=value ...]");
                return ExitCode::from(1);
            }
            listen(&args[2], &args[3], &args[4..]).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("origin-client {}", origin_client::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"origin-client - Origin-bound HTTP session client

USAGE:
    origin-client <COMMAND> <origin> <target> [key=value ...]

COMMANDS:
    get     GET <target>, key=value pairs become query parameters
    post    POST <target>, key=value pairs become a form body
    ws      Open a WebSocket and print incoming text frames
    help    Show this help message
    version Show version information

EXAMPLES:
    origin-client get https://example.com /search q=rust
    origin-client post https://example.com /login user=jane pass=secret
    origin-client ws http://localhost:8080 /events
"#
    );
}

fn parse_pairs(pairs: &[String]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.clone(), String::new()),
        })
        .collect()
}

async fn send(command: &str, origin: &str, target: &str, pairs: &[String]) -> ExitCode {
    let session = match Session::new(origin) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to create session: {}", e);
            return ExitCode::from(1);
        }
    };

    let pairs = parse_pairs(pairs);
    let result = if command == "post" {
        session.post(target, Session::form_data(pairs, None)).await
    } else {
        let options = pairs
            .into_iter()
            .fold(RequestOptions::new(), |options, (k, v)| options.param(k, v));
        session.get(target, options).await
    };

    match result {
        Ok(response) => {
            println!("URL: {}", response.url_str());
            println!("Status: {}", response.status);
            println!("Time: {}ms", response.response_time_ms);
            for (name, value) in response.headers.iter() {
                println!("  {}: {}", name, value.to_str().unwrap_or("<binary>"));
            }

            let jar = session.cookie_jar();
            if !jar.is_empty() {
                println!("\nCookies ({}):", jar.len());
                for (name, value) in jar.to_map() {
                    println!("  {} = {}", name, value);
                }
            }

            println!("\n{}", response.text_lossy());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(1)
        }
    }
}

#[cfg(feature = "websocket")]
async fn listen(origin: &str, target: &str, pairs: &[String]) -> ExitCode {
    use futures::StreamExt;
    use origin_client::ConnectOptions;
    use tokio_tungstenite::tungstenite::Message;

    let session = match Session::new(origin) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to create session: {}", e);
            return ExitCode::from(1);
        }
    };

    let options = parse_pairs(pairs)
        .into_iter()
        .fold(ConnectOptions::new(), |options, (k, v)| options.param(k, v));

    let mut socket = match session.connect(target, options).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to connect: {}", e);
            return ExitCode::from(1);
        }
    };

    while let Some(message) = socket.next().await {
        match message {
            Ok(Message::Text(text)) => println!("{}", text),
            Ok(Message::Close(frame)) => {
                println!("Closed: {:?}", frame);
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("WebSocket error: {}", e);
                return ExitCode::from(1);
            }
        }
    }

    ExitCode::SUCCESS
}
