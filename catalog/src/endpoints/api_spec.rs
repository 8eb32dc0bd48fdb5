use crate::config::Config;
use actix_files::NamedFile;
use actix_web::get;
use actix_web::web::Data;

#[get("/api.yaml")]
pub async fn api_spec(config: Data<Config>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(&config.api_spec_path).await?)
}
