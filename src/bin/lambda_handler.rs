//! AWS Lambda handler for the simulators
//!
//! Accepts a simulation request as JSON and returns the projected series
//! (or the three-leg comparison) with a summary.
//!
//! Supports Lambda Function URLs for direct HTTP access from the browser.

use finai::projection::{ProjectionConfig, RateConvention, ScenarioInput};
use finai::{ScenarioRunner, Simulation, SimulationOutput};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Input for one simulation
#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    /// Which simulator to run
    pub scenario: Simulation,

    /// Starting balance, rate, horizon and optional flags
    #[serde(flatten)]
    pub input: ScenarioInput,

    /// Annual-to-monthly conversion for fixed income (default: nominal)
    #[serde(default)]
    pub rate_convention: RateConvention,
}

/// Output from the simulation
#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub scenario: Simulation,
    #[serde(flatten)]
    pub output: SimulationOutput,
    pub execution_time_ms: u64,
}

/// Status code and JSON body for a request body
fn handle_body(body: &str) -> (u16, serde_json::Value) {
    let start = std::time::Instant::now();

    let request: SimulationRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return (400, serde_json::json!({ "error": format!("Invalid JSON: {}", e) })),
    };
    debug!("simulation request: {:?}", request);

    let runner = ScenarioRunner::with_config(ProjectionConfig {
        fixed_income_convention: request.rate_convention,
    });

    let output = match runner.run(request.scenario, &request.input) {
        Ok(output) => output,
        Err(e) => {
            warn!("rejected simulation: {}", e);
            return (400, serde_json::json!({ "error": e.to_string() }));
        }
    };

    let response = SimulationResponse {
        scenario: request.scenario,
        output,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    match serde_json::to_value(&response) {
        Ok(value) => (200, value),
        Err(e) => (500, serde_json::json!({ "error": e.to_string() })),
    }
}

fn json_response(status: u16, body: &serde_json::Value) -> Result<Response<Body>, Error> {
    let response = Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(body.to_string()))?;
    Ok(response)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        let response = Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?;
        return Ok(response);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let (status, body) = handle_body(&body_str);
    json_response(status, &body)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
