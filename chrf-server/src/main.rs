use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, post, web};
use log::info;
use serde::{Deserialize, Serialize};

use chrf_core::{ChrfError, ChrfScore, EvalConfig, Evaluator, NgramScores, SentenceStats};

/// Body of `POST /v1/sentence`
#[derive(Serialize, Deserialize)]
struct SentenceRequest {
	hypothesis: String,
	references: Vec<String>,
	config: Option<EvalConfig>,
}

#[derive(Serialize)]
struct SentenceResponse {
	score: ChrfScore,
	ngrams: NgramScores,
	stats: SentenceStats,
}

/// Body of `POST /v1/corpus`
#[derive(Serialize, Deserialize)]
struct CorpusRequest {
	hypotheses: Vec<String>,
	references: Vec<Vec<String>>,
	config: Option<EvalConfig>,
}

#[derive(Serialize)]
struct CorpusResponse {
	sentences: usize,
	score: ChrfScore,
	ngrams: NgramScores,
}

/// Maps a scoring error to an HTTP response.
fn error_response(e: ChrfError) -> HttpResponse {
	match e {
		ChrfError::LengthMismatch { .. } | ChrfError::Configuration(_) => HttpResponse::BadRequest().body(e.to_string()),
		_ => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP POST endpoint `/v1/sentence`
///
/// Scores one hypothesis against its alternative references. Uses the
/// server defaults unless the request carries its own `config`.
#[post("/v1/sentence")]
async fn post_sentence(defaults: web::Data<EvalConfig>, body: web::Json<SentenceRequest>) -> impl Responder {
	let request = body.into_inner();
	let evaluator = Evaluator::new(request.config.unwrap_or_else(|| defaults.get_ref().clone()));

	let stats = evaluator.score_sentence(&request.hypothesis, &request.references);
	let ngrams = stats.scores(evaluator.config().beta());
	let score = ngrams.weighted(evaluator.config().weights());

	HttpResponse::Ok().json(SentenceResponse { score, ngrams, stats })
}

/// HTTP POST endpoint `/v1/corpus`
///
/// Scores a whole corpus; hypotheses and reference groups must have the
/// same length.
#[post("/v1/corpus")]
async fn post_corpus(defaults: web::Data<EvalConfig>, body: web::Json<CorpusRequest>) -> impl Responder {
	let request = body.into_inner();
	let evaluator = Evaluator::new(request.config.unwrap_or_else(|| defaults.get_ref().clone()));

	let result = web::block(move || {
		let stats = evaluator.evaluate_parallel(&request.hypotheses, &request.references)?;
		let ngrams = stats.scores(evaluator.config().beta());
		let score = ngrams.weighted(evaluator.config().weights());
		Ok::<_, ChrfError>(CorpusResponse { sentences: stats.sentences(), score, ngrams })
	})
	.await;

	match result {
		Ok(Ok(response)) => HttpResponse::Ok().json(response),
		Ok(Err(e)) => error_response(e),
		Err(_) => HttpResponse::InternalServerError().body("Scoring task failed"),
	}
}

/// HTTP GET endpoint `/v1/config`: the defaults applied to requests.
#[get("/v1/config")]
async fn get_config(defaults: web::Data<EvalConfig>) -> impl Responder {
	HttpResponse::Ok().json(defaults.get_ref())
}

/// Main entry point for the server.
///
/// Starts an Actix-web HTTP server with the default chrF configuration
/// shared by all workers.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Logging is configured through `RUST_LOG`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let defaults = web::Data::new(EvalConfig::default());
	info!("Listening on 127.0.0.1:5000");

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(defaults.clone())
			.service(post_sentence)
			.service(post_corpus)
			.service(get_config)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;

	macro_rules! app {
		() => {
			test::init_service(
				App::new()
					.app_data(web::Data::new(EvalConfig::new(1, 1.0).unwrap()))
					.service(post_sentence)
					.service(post_corpus)
					.service(get_config),
			)
			.await
		};
	}

	#[actix_web::test]
	async fn sentence_scores_best_reference() {
		let app = app!();
		let req = test::TestRequest::post()
			.uri("/v1/sentence")
			.set_json(SentenceRequest {
				hypothesis: "ab".to_owned(),
				references: vec!["xy".to_owned(), "ab".to_owned()],
				config: None,
			})
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);

		let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
		assert!(body.contains(r#""score":{"precision":100.0,"recall":100.0,"f":100.0}"#));
	}

	#[actix_web::test]
	async fn corpus_length_mismatch_is_bad_request() {
		let app = app!();
		let req = test::TestRequest::post()
			.uri("/v1/corpus")
			.set_json(CorpusRequest {
				hypotheses: vec!["a".to_owned(), "b".to_owned()],
				references: vec![vec!["a".to_owned()]],
				config: None,
			})
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

		let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
		assert_eq!(body, "Input references was too short. Row 1 (and later) missing.");
	}

	#[actix_web::test]
	async fn corpus_uses_request_config() {
		let app = app!();
		let req = test::TestRequest::post()
			.uri("/v1/corpus")
			.set_json(CorpusRequest {
				hypotheses: vec!["abc".to_owned()],
				references: vec![vec!["xyz".to_owned()]],
				config: Some(EvalConfig::new(1, 1.0).unwrap()),
			})
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);

		let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
		assert!(body.contains(r#""sentences":1"#));
		assert!(body.contains(r#""f":25.0"#));
	}

	#[actix_web::test]
	async fn invalid_config_is_rejected() {
		let app = app!();
		let req = test::TestRequest::post()
			.uri("/v1/sentence")
			.insert_header(("content-type", "application/json"))
			.set_payload(r#"{"hypothesis":"a","references":["a"],"config":{"max_n":0}}"#)
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn oversized_order_is_rejected() {
		let app = app!();
		for uri in ["/v1/sentence", "/v1/corpus"] {
			let payload = if uri == "/v1/sentence" {
				r#"{"hypothesis":"a","references":["a"],"config":{"max_n":18446744073709551615}}"#
			} else {
				r#"{"hypotheses":["a"],"references":[["a"]],"config":{"max_n":18446744073709551615}}"#
			};
			let req = test::TestRequest::post()
				.uri(uri)
				.insert_header(("content-type", "application/json"))
				.set_payload(payload)
				.to_request();
			let resp = test::call_service(&app, req).await;
			assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
		}
	}

	#[actix_web::test]
	async fn config_endpoint_returns_defaults() {
		let app = app!();
		let req = test::TestRequest::get().uri("/v1/config").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);

		let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
		assert_eq!(body, r#"{"max_n":1,"beta":1.0,"weights":[1.0],"use_space":true}"#);
	}
}
