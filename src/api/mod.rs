mod error;
mod input;

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{CompensationParameters, Projection, build_projection};
use crate::report::ProjectionReport;

pub use error::{ApiError, InputError};
pub use input::{DisplayNumber, parse_formatted_number, percent_to_fraction, whole_vesting_years};

#[derive(Parser, Debug)]
#[command(
    name = "compcalc",
    about = "Salary and vesting equity projection with a capital-gains exit valuation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the projection HTTP API
    Serve {
        #[arg(default_value_t = 8080)]
        port: u16,
    },
    /// Print a ten-year projection and exit valuation
    Project(ProjectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(long, default_value_t = 120_000.0, help = "Annual base salary")]
    pub base_salary: f64,
    #[arg(
        long,
        default_value_t = 10.0,
        help = "Equity grant as a percent of the company, e.g. 10"
    )]
    pub equity_percentage: f64,
    #[arg(
        long,
        default_value_t = 4,
        help = "Years over which equity vests linearly"
    )]
    pub vesting_years: u32,
    #[arg(long, default_value_t = 10_000_000.0, help = "Current company valuation")]
    pub company_value: f64,
    #[arg(
        long,
        default_value_t = 2.0,
        help = "Multiple applied to today's equity value at exit"
    )]
    pub exit_multiple: f64,
    #[arg(long, help = "Ignore all taxes")]
    pub no_tax: bool,
    #[arg(long, default_value_t = 35.0, help = "Federal income tax rate in percent")]
    pub federal_tax_rate: f64,
    #[arg(long, default_value_t = 6.85, help = "State income tax rate in percent")]
    pub state_tax_rate: f64,
    #[arg(long, default_value_t = 3.876, help = "City income tax rate in percent")]
    pub city_tax_rate: f64,
    #[arg(long, help = "Print the JSON response body instead of the text report")]
    pub json: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectionPayload {
    base_salary: Option<DisplayNumber>,
    equity_percentage: Option<DisplayNumber>,
    vesting_years: Option<DisplayNumber>,
    company_value: Option<DisplayNumber>,
    exit_multiple: Option<DisplayNumber>,
    include_tax: Option<bool>,
    federal_tax_rate: Option<DisplayNumber>,
    #[serde(alias = "nyTaxRate")]
    state_tax_rate: Option<DisplayNumber>,
    #[serde(alias = "nycTaxRate")]
    city_tax_rate: Option<DisplayNumber>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    parameters: CompensationParameters,
    #[serde(flatten)]
    projection: Projection,
}

fn build_parameters(args: &ProjectArgs) -> Result<CompensationParameters, InputError> {
    if args.vesting_years == 0 {
        return Err(InputError::VestingYears("--vesting-years"));
    }

    Ok(CompensationParameters {
        base_salary: args.base_salary,
        equity_percentage: percent_to_fraction(args.equity_percentage),
        vesting_years: args.vesting_years,
        company_value: args.company_value,
        exit_multiple: args.exit_multiple,
        include_tax: !args.no_tax,
        federal_tax_rate: percent_to_fraction(args.federal_tax_rate),
        state_tax_rate: percent_to_fraction(args.state_tax_rate),
        city_tax_rate: percent_to_fraction(args.city_tax_rate),
    })
}

/// Renders the `project` subcommand output.
pub fn run_project_command(args: &ProjectArgs) -> Result<String, ApiError> {
    let parameters = build_parameters(args)?;
    let projection = build_projection(&parameters);
    debug!(
        vesting_years = parameters.vesting_years,
        gross_exit_value = projection.exit_valuation.gross_exit_value,
        "computed projection"
    );

    if args.json {
        let response = ProjectionResponse {
            parameters,
            projection,
        };
        return Ok(format!("{}\n", serde_json::to_string_pretty(&response)?));
    }
    Ok(ProjectionReport::new(&projection).to_string())
}

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/projection",
            get(projection_get_handler).post(projection_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("compensation API listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/api/projection");

    axum::serve(listener, router()).await
}

async fn not_found_handler() -> Response {
    ApiError::NotFound.into_response()
}

async fn projection_get_handler(
    payload: Result<Query<ProjectionPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => projection_handler_impl(payload),
        Err(rejection) => reject(ApiError::Payload(rejection.body_text())),
    }
}

async fn projection_post_handler(
    payload: Result<Json<ProjectionPayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => projection_handler_impl(payload),
        Err(rejection) => reject(ApiError::Payload(rejection.body_text())),
    }
}

fn projection_handler_impl(payload: ProjectionPayload) -> Response {
    let parameters = match api_request_from_payload(payload) {
        Ok(parameters) => parameters,
        Err(err) => return reject(err.into()),
    };

    let projection = build_projection(&parameters);
    debug!(
        vesting_years = parameters.vesting_years,
        include_tax = parameters.include_tax,
        gross_exit_value = projection.exit_valuation.gross_exit_value,
        "computed projection"
    );
    json_response(
        StatusCode::OK,
        ProjectionResponse {
            parameters,
            projection,
        },
    )
}

fn reject(err: ApiError) -> Response {
    warn!(error = %err, "rejected projection request");
    err.into_response()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<CompensationParameters, ApiError> {
    let payload = serde_json::from_str::<ProjectionPayload>(json)
        .map_err(|e| ApiError::Payload(e.to_string()))?;
    Ok(api_request_from_payload(payload)?)
}

fn api_request_from_payload(
    payload: ProjectionPayload,
) -> Result<CompensationParameters, InputError> {
    let mut args = default_args_for_api();

    if let Some(v) = payload.base_salary {
        args.base_salary = v.value();
    }
    if let Some(v) = payload.equity_percentage {
        args.equity_percentage = v.value();
    }
    if let Some(v) = payload.vesting_years {
        args.vesting_years =
            whole_vesting_years(v.value()).ok_or(InputError::VestingYears("vestingYears"))?;
    }
    if let Some(v) = payload.company_value {
        args.company_value = v.value();
    }
    if let Some(v) = payload.exit_multiple {
        args.exit_multiple = v.value();
    }
    if let Some(v) = payload.include_tax {
        args.no_tax = !v;
    }
    if let Some(v) = payload.federal_tax_rate {
        args.federal_tax_rate = v.value();
    }
    if let Some(v) = payload.state_tax_rate {
        args.state_tax_rate = v.value();
    }
    if let Some(v) = payload.city_tax_rate {
        args.city_tax_rate = v.value();
    }

    build_parameters(&args)
}

fn default_args_for_api() -> ProjectArgs {
    ProjectArgs {
        base_salary: 120_000.0,
        equity_percentage: 10.0,
        vesting_years: 4,
        company_value: 10_000_000.0,
        exit_multiple: 2.0,
        no_tax: false,
        federal_tax_rate: 35.0,
        state_tax_rate: 6.85,
        city_tax_rate: 3.876,
        json: false,
    }
}
