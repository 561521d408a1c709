use utoipa::OpenApi;

use crate::application::http::{analysis::router::AnalysisApiDoc, health::router::HealthApiDoc};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LabelIQ API",
        description = "Ingredient label analysis proxy"
    ),
    nest(
        (path = "/api", api = AnalysisApiDoc),
        (path = "/api", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
