//! Environment bootstrap

/// Load variables from a `.env` file if one is present.
///
/// Missing files are not an error; existing process variables win over
/// file entries.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}
