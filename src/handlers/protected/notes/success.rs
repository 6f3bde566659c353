use serde::Serialize;

use crate::middleware::Page;
use crate::routes::paths;

#[derive(Debug, Serialize)]
pub struct SuccessContext {
    pub message: &'static str,
    pub list: &'static str,
}

/// GET /done/ - shown after every successful create, edit or delete
pub async fn success() -> Page<SuccessContext> {
    Page::ok(SuccessContext {
        message: "Done! Your changes have been saved.",
        list: paths::LIST,
    })
}
