use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use rs_namegen_core::model::composer::NameComposer;
use rs_namegen_core::model::config::ComposerConfig;
use rs_namegen_core::model::presets::Preset;
use rs_namegen_core::text::title_case;

/// Largest `n` accepted by `/v1/generate`.
const MAX_NAMES: usize = 10_000;

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	n: Option<usize>,
	seed: Option<u64>,
	raw: Option<bool>,
}

/// Active configuration and the composer built from it.
struct SharedData {
	config: ComposerConfig,
	composer: NameComposer,
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates `n` names (default 10) with the active configuration.
/// Returns one name per line.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let n = query.n.unwrap_or(10);
	if n > MAX_NAMES {
		return HttpResponse::BadRequest().body(format!("n must be at most {MAX_NAMES}"));
	}

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Composer lock failed"),
	};

	let mut rng = match query.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	match shared_data.composer.generate_many(n, &mut rng) {
		Ok(names) => {
			let names: Vec<String> = if query.raw.unwrap_or(false) {
				names
			} else {
				names.iter().map(|name| title_case(name)).collect()
			};
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

#[get("/v1/config")]
async fn get_config(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	match data.lock() {
		Ok(shared_data) => HttpResponse::Ok().json(&shared_data.config),
		Err(_) => HttpResponse::InternalServerError().body("Composer lock failed"),
	}
}

/// HTTP PUT endpoint `/v1/config`
///
/// Replaces the active configuration. Missing fields take their default value.
/// The previous configuration stays active if the new one is rejected.
#[put("/v1/config")]
async fn put_config(data: web::Data<Mutex<SharedData>>, body: web::Json<ComposerConfig>) -> impl Responder {
	let config = body.into_inner();
	let composer = match NameComposer::from_config(&config) {
		Ok(c) => c,
		Err(e) => {
			warn!("rejected configuration: {e}");
			return HttpResponse::BadRequest().body(e.to_string());
		}
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Composer lock failed"),
	};
	info!("configuration updated: {config:?}");
	shared_data.config = config;
	shared_data.composer = composer;

	HttpResponse::Ok().body("Configuration loaded successfully")
}

#[get("/v1/presets")]
async fn get_presets() -> impl Responder {
	let names: Vec<&str> = Preset::ALL.iter().map(|preset| preset.name()).collect();
	HttpResponse::Ok().body(names.join("\n"))
}

fn shared_state(config: ComposerConfig) -> Result<web::Data<Mutex<SharedData>>, Box<dyn std::error::Error>> {
	let composer = NameComposer::from_config(&config)?;
	Ok(web::Data::new(Mutex::new(SharedData { config, composer })))
}

/// Main entry point for the server.
///
/// Builds the default composer, wraps it in a `Mutex` and starts an
/// Actix-web HTTP server.
///
/// # Notes
/// - Binds to `NAMEGEN_ADDR`, or 127.0.0.1:5000 when unset.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();

	let shared_data = shared_state(ComposerConfig::default())?;
	let addr = std::env::var("NAMEGEN_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());
	info!("listening on {addr}");

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_config)
			.service(put_config)
			.service(get_presets)
	})
		.bind(addr)?
		.run()
		.await?;

	Ok(())
}
