//! Service dashboard: probe configured services and show their status.
//!
//! Probes are blocking and independent, so they run on rayon's pool with
//! results kept in configuration order. PING has no raw-socket path here;
//! it is measured as the average of a few TCP connect round trips.

use std::io::{self, BufRead, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use crate::config;
use crate::error::{PageError, ProbeError};
use crate::page::{Feedback, Page};
use crate::report;
use crate::strings::Text;
use crate::types::{Config, Operation, ServiceConfig, ServiceStatus};

/// Connect attempts averaged for a PING probe.
const PING_ATTEMPTS: u32 = 3;

/// Redirects an HTTP probe follows before giving up.
const MAX_REDIRECTS: usize = 10;

/// Where a service is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

/// Fill in host and port from the dashboard defaults.
pub fn target(service: &ServiceConfig, config: &Config) -> Target {
    let host = if service.host.trim().is_empty() {
        config.dashboard_default_host.clone()
    } else {
        service.host.trim().to_string()
    };
    let port = service
        .port
        .or(config.dashboard_default_port)
        .unwrap_or_else(|| service.protocol.default_port());
    Target { host, port }
}

/// "http://host:port/path" for an HTTP probe.
pub fn service_url(service: &ServiceConfig, target: &Target) -> String {
    let path = service.path.trim();
    let slash = if path.starts_with('/') { "" } else { "/" };
    format!(
        "{}://{}:{}{slash}{path}",
        service.protocol.as_str(),
        target.host,
        target.port
    )
}

// ============================================================================
// PROBES
// ============================================================================

/// Probe every configured service, in parallel, keeping order.
pub fn probe_all(config: &Config) -> Vec<ServiceStatus> {
    config
        .dashboard
        .par_iter()
        .map(|service| probe(service, config))
        .collect()
}

/// Probe one service. Never fails: problems become an offline status.
pub fn probe(service: &ServiceConfig, config: &Config) -> ServiceStatus {
    let target = target(service, config);
    let timeout = Duration::from_millis(config.probe_timeout_ms.max(1));

    let outcome = match service.operation {
        Operation::Ping => ping(&target, timeout, PING_ATTEMPTS),
        Operation::Tcp => ping(&target, timeout, 1),
        Operation::Http => http(&service_url(service, &target), service.success, timeout),
    };

    let (online, detail) = match outcome {
        Ok(result) => result,
        Err(e) => {
            tracing::debug!(service = %service.name, error = %e, "probe failed");
            (false, Text::NoResponseFromServer.to_string())
        }
    };

    if online {
        tracing::debug!(service = %service.name, %detail, "service online");
    } else {
        tracing::warn!(service = %service.name, %detail, "service offline");
    }

    ServiceStatus {
        name: service.name.clone(),
        online,
        detail,
    }
}

fn resolve(target: &Target) -> io::Result<SocketAddr> {
    (target.host.as_str(), target.port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "host has no address"))
}

/// Average connect round trip over `attempts` connections.
fn ping(target: &Target, timeout: Duration, attempts: u32) -> Result<(bool, String), ProbeError> {
    let addr = resolve(target)?;
    let attempts = attempts.max(1);

    let mut total = Duration::ZERO;
    for _ in 0..attempts {
        let start = Instant::now();
        TcpStream::connect_timeout(&addr, timeout)?;
        total += start.elapsed();
    }

    Ok((true, format_rtt(total / attempts)))
}

/// `GET` following redirects; online on 200 or the configured success code.
fn http(url: &str, success: Option<u16>, timeout: Duration) -> Result<(bool, String), ProbeError> {
    // Services are probed directly, never through a proxy.
    let client = Client::builder()
        .timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .no_proxy()
        .build()?;

    let status = client.get(url).send()?.status();
    let code = status.as_u16();
    let online = code == 200 || success == Some(code);
    Ok((online, status.to_string()))
}

/// "850 µs", "12 ms", "1.2 s".
fn format_rtt(rtt: Duration) -> String {
    let micros = rtt.as_micros();
    if micros < 1_000 {
        format!("{micros} µs")
    } else if micros < 1_000_000 {
        format!("{} ms", micros / 1_000)
    } else {
        format!("{:.1} s", rtt.as_secs_f64())
    }
}

// ============================================================================
// PAGE
// ============================================================================

/// One field/value line per service, status in bold.
pub fn build_page(statuses: &[ServiceStatus], config: &Config) -> Result<Page, PageError> {
    let mut page = Page::new(
        Text::DashboardTitle.as_str(),
        config.page_capacity,
        &config.display,
    )?;

    if statuses.is_empty() {
        page.add_raw(Text::NoServices.as_str());
    }
    for status in statuses {
        page.add_emphasized_field_value(&status.name, report::status_text(status));
    }
    Ok(page)
}

/// Show results until the user quits.
pub fn show<R: BufRead, W: Write>(
    statuses: &[ServiceStatus],
    config: &Config,
    input: &mut R,
    output: &mut W,
) -> Result<(), PageError> {
    let mut page = build_page(statuses, config)?;

    let offline = statuses.len() - report::online_count(statuses);
    if statuses.is_empty() {
        page.report(Feedback::hint(format!(
            "{} {}",
            Text::NoServicesHint,
            config::default_config_path().display()
        )));
    } else if offline > 0 {
        page.report(Feedback::warning(format!(
            "{} {offline} of {}",
            Text::ServicesOffline,
            statuses.len()
        )));
    }

    // Only paging and quit are registered: the loop ends on quit.
    page.run_with(input, output);
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DisplayConfig, Scheme};
    use std::io::{Cursor, Read};
    use std::net::TcpListener;
    use std::thread;

    fn config(services: Vec<ServiceConfig>) -> Config {
        Config {
            display: DisplayConfig::plain(80),
            dashboard: services,
            dashboard_default_host: "127.0.0.1".into(),
            probe_timeout_ms: 2000,
            ..Config::default()
        }
    }

    fn service(name: &str, operation: Operation, port: u16) -> ServiceConfig {
        ServiceConfig {
            name: name.into(),
            operation,
            protocol: Scheme::Http,
            host: String::new(),
            port: Some(port),
            path: "/health".into(),
            success: None,
        }
    }

    /// A port with nothing listening on it.
    fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    /// Answer one HTTP request with `response`.
    fn http_server(response: impl Into<String>) -> u16 {
        let response = response.into();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        port
    }

    #[test]
    fn target_falls_back_to_defaults() {
        let mut cfg = config(vec![]);
        let mut svc = service("a", Operation::Tcp, 1);
        svc.port = None;
        assert_eq!(target(&svc, &cfg).port, 80);
        assert_eq!(target(&svc, &cfg).host, "127.0.0.1");

        svc.protocol = Scheme::Https;
        assert_eq!(target(&svc, &cfg).port, 443);

        cfg.dashboard_default_port = Some(8080);
        assert_eq!(target(&svc, &cfg).port, 8080);

        svc.host = "example.org".into();
        svc.port = Some(443);
        assert_eq!(
            target(&svc, &cfg),
            Target {
                host: "example.org".into(),
                port: 443
            }
        );
    }

    #[test]
    fn url_carries_protocol_and_path() {
        let mut svc = service("nas", Operation::Http, 8443);
        svc.protocol = Scheme::Https;
        let target = Target {
            host: "nas.local".into(),
            port: 8443,
        };
        assert_eq!(service_url(&svc, &target), "https://nas.local:8443/health");

        svc.path = "status".into();
        svc.protocol = Scheme::Http;
        assert_eq!(service_url(&svc, &target), "http://nas.local:8443/status");

        svc.path = String::new();
        assert_eq!(service_url(&svc, &target), "http://nas.local:8443/");
    }

    #[test]
    fn rtt_units() {
        assert_eq!(format_rtt(Duration::from_micros(850)), "850 µs");
        assert_eq!(format_rtt(Duration::from_millis(12)), "12 ms");
        assert_eq!(format_rtt(Duration::from_millis(1_200)), "1.2 s");
    }

    #[test]
    fn tcp_probe_sees_a_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let cfg = config(vec![]);

        let status = probe(&service("local", Operation::Tcp, port), &cfg);
        assert!(status.online, "{status:?}");

        let status = probe(&service("local", Operation::Ping, port), &cfg);
        assert!(status.online, "{status:?}");
    }

    #[test]
    fn closed_port_is_offline() {
        let cfg = config(vec![]);
        let status = probe(&service("gone", Operation::Tcp, closed_port()), &cfg);
        assert!(!status.online);
        assert_eq!(status.detail, "no response from server");
    }

    #[test]
    fn http_200_is_online() {
        let port = http_server("HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n");
        let status = probe(&service("web", Operation::Http, port), &config(vec![]));
        assert!(status.online);
        assert_eq!(status.detail, "200 OK");
    }

    #[test]
    fn http_other_status_needs_success_code() {
        let port = http_server("HTTP/1.1 204 No Content\r\n\r\n");
        let status = probe(&service("web", Operation::Http, port), &config(vec![]));
        assert!(!status.online);
        assert_eq!(status.detail, "204 No Content");

        let port = http_server("HTTP/1.1 204 No Content\r\n\r\n");
        let mut svc = service("web", Operation::Http, port);
        svc.success = Some(204);
        assert!(probe(&svc, &config(vec![])).online);
    }

    #[test]
    fn http_follows_redirects() {
        let healthy = http_server("HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n");
        let moved = http_server(format!(
            "HTTP/1.1 301 Moved Permanently\r\nLocation: http://127.0.0.1:{healthy}/\r\nContent-Length: 0\r\n\r\n"
        ));
        let status = probe(&service("web", Operation::Http, moved), &config(vec![]));
        assert!(status.online, "{status:?}");
        assert_eq!(status.detail, "200 OK");
    }

    #[test]
    fn https_is_not_spoken_as_plain_http() {
        let port = http_server("HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n");
        let mut svc = service("web", Operation::Http, port);
        svc.protocol = Scheme::Https;
        let status = probe(&svc, &config(vec![]));
        assert!(!status.online);
        assert_eq!(status.detail, "no response from server");
    }

    #[test]
    fn probe_all_keeps_configuration_order() {
        let names = ["one", "two", "three", "four"];
        let services = names
            .iter()
            .map(|n| service(n, Operation::Tcp, closed_port()))
            .collect();
        let statuses = probe_all(&config(services));
        let got: Vec<&str> = statuses.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(got, names);
    }

    #[test]
    fn page_lists_each_service() {
        let statuses = vec![
            ServiceStatus {
                name: "router".into(),
                online: true,
                detail: "2 ms".into(),
            },
            ServiceStatus {
                name: "nas".into(),
                online: false,
                detail: String::new(),
            },
        ];
        let page = build_page(&statuses, &config(vec![])).unwrap();
        let layout = page.layout();
        let lines: Vec<String> = page.rows().iter().map(|r| r.render(&layout)).collect();
        assert_eq!(lines[0], format!("{:<20} : ONLINE (2 ms)", "router"));
        assert_eq!(lines[1], format!("{:<20} : OFFLINE", "nas"));
    }

    #[test]
    fn show_returns_on_quit() {
        let mut input = Cursor::new(b"q\n".to_vec());
        let mut output = Vec::new();
        show(&[], &config(vec![]), &mut input, &mut output).unwrap();
        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("No services configured"));
        assert!(out.contains("HINT add services"));
    }

    #[test]
    fn show_warns_about_offline_services() {
        let statuses = vec![
            ServiceStatus {
                name: "a".into(),
                online: true,
                detail: String::new(),
            },
            ServiceStatus {
                name: "b".into(),
                online: false,
                detail: String::new(),
            },
        ];
        let mut input = Cursor::new(b"q\n".to_vec());
        let mut output = Vec::new();
        show(&statuses, &config(vec![]), &mut input, &mut output).unwrap();
        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("WARNING services offline: 1 of 2"));
    }
}
