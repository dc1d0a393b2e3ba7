//! Web server command.

use std::net::Ipv6Addr;

use console::style;

use crate::config::Settings;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind)?;

    if settings.uses_default_secret() {
        println!(
            "{} Using the default session secret; set MOODIFY_SECRET before exposing the server",
            style("!").yellow()
        );
    }

    println!(
        "{} Starting Moodify at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "3030" -> 127.0.0.1:3030
/// - Just a host: "0.0.0.0" -> 0.0.0.0:3030
/// - Host and port: "0.0.0.0:3030" -> 0.0.0.0:3030
/// - IPv6, bare or bracketed: "::1", "[::1]", "[::1]:3030"
///
/// IPv6 hosts are returned bracketed so they can be joined with the port.
fn parse_bind_address(bind: &str) -> anyhow::Result<(String, u16)> {
    let bind = bind.trim();
    if bind.is_empty() {
        anyhow::bail!("Bind address must not be empty");
    }

    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    if let Some(rest) = bind.strip_prefix('[') {
        let Some((addr, tail)) = rest.split_once(']') else {
            anyhow::bail!("Unterminated IPv6 address in bind address: {}", bind);
        };
        if addr.parse::<Ipv6Addr>().is_err() {
            anyhow::bail!("Invalid IPv6 address in bind address: {}", bind);
        }
        let host = format!("[{}]", addr);
        if tail.is_empty() {
            return Ok((host, 3030));
        }
        return match tail.strip_prefix(':').map(str::parse::<u16>) {
            Some(Ok(port)) => Ok((host, port)),
            _ => anyhow::bail!("Invalid port in bind address: {}", bind),
        };
    }

    if bind.parse::<Ipv6Addr>().is_ok() {
        return Ok((format!("[{}]", bind), 3030));
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if host.contains(':') {
            anyhow::bail!("IPv6 addresses with a port must be bracketed: {}", bind);
        }
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
        anyhow::bail!("Invalid port in bind address: {}", bind);
    }

    Ok((bind.to_string(), 3030))
}
