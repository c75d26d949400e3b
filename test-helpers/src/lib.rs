pub mod mock;
pub mod routes;
pub mod telemetry;

use actix_cors::Cors;
use actix_multipart::form::{MultipartFormConfig, text::TextConfig};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use payloads::{Company, CompanyId};
use reqwest::StatusCode;
use std::net::TcpListener;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub use routes::{RecordedFile, RecordedUpdate, StubState};

/// Upper bound on request bodies; comfortably above the 5 MiB logo limit so
/// oversized uploads reach the handler instead of failing in the extractor.
const BODY_LIMIT: usize = 20 * 1024 * 1024;

pub struct StubConfig {
    pub ip: String,
    pub port: u16,
}

/// Build the stub server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(
    config: &mut StubConfig,
    stub: web::Data<StubState>,
) -> std::io::Result<Server> {
    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        // The UI is served from a different port during development and
        // sends cookies with every request.
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(cors)
            .app_data(stub.clone())
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(BODY_LIMIT)
                    .memory_limit(BODY_LIMIT),
            )
            // reqwest sends text parts without a content type
            .app_data(TextConfig::default().validate_content_type(false))
            .configure(routes::configure)
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub client: payloads::APIClient,
    pub stub: web::Data<StubState>,
}

impl TestApp {
    /// Acme, the company most tests edit.
    pub fn create_acme(&self) -> Company {
        let details = mock::acme();
        self.stub.insert_company(
            &details.name,
            &details.description,
            &details.website,
            &details.location,
        )
    }

    pub fn company(&self, company_id: &CompanyId) -> Option<Company> {
        self.stub.company(company_id)
    }

    pub fn recorded_updates(&self) -> Vec<RecordedUpdate> {
        self.stub.recorded_updates()
    }
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let mut config = StubConfig {
        ip: "127.0.0.1".into(),
        port,
    };
    let stub = web::Data::new(StubState::default());

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    let server = build(&mut config, stub.clone()).unwrap();
    tokio::spawn(server);

    TestApp {
        port: config.port,
        client: payloads::APIClient {
            address: format!("http://127.0.0.1:{}", config.port),
            inner_client: client,
        },
        stub,
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
