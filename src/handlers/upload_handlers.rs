use std::path::Path;

use actix_multipart::Multipart;
use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use futures_util::TryStreamExt as _;
use rand::Rng as _;

use crate::auth::session;
use crate::config::Config;
use crate::errors::AppError;

/// Collision-resistant stored name: upload millis plus a random hex tag,
/// keeping the client extension.
fn stored_name(original: Option<&str>) -> String {
    let ext = original
        .and_then(|f| Path::new(f).extension())
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    let mut tag = [0u8; 4];
    rand::rng().fill(&mut tag);
    format!("{}_{}.{}", Utc::now().timestamp_millis(), hex::encode(tag), ext)
}

/// POST /api/uploads/logo: multipart field `logo`, images only, capped at
/// the configured size. Admin only. Returns the public URL under /uploads.
pub async fn logo(
    config: web::Data<Config>,
    session: Session,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&session)?;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?
    {
        if field.name() != Some("logo") {
            continue;
        }

        let content_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(AppError::Upload(
                "Apenas arquivos de imagem são permitidos.".to_string(),
            ));
        }

        let original = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let mut data: Vec<u8> = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?
        {
            if data.len() + chunk.len() > config.max_upload_bytes {
                return Err(AppError::Upload(
                    "Arquivo muito grande (máximo de 2MB).".to_string(),
                ));
            }
            data.extend_from_slice(&chunk);
        }
        if data.is_empty() {
            return Err(AppError::Upload("Nenhum arquivo enviado.".to_string()));
        }

        std::fs::create_dir_all(&config.upload_dir)
            .map_err(|e| AppError::Upload(e.to_string()))?;
        let filename = stored_name(original.as_deref());
        let path = Path::new(&config.upload_dir).join(&filename);
        std::fs::write(&path, &data).map_err(|e| AppError::Upload(e.to_string()))?;

        let url = format!(
            "{}/uploads/{}",
            config.public_base_url.trim_end_matches('/'),
            filename
        );
        log::info!("logo stored at {} ({} bytes)", path.display(), data.len());
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Upload realizado com sucesso.",
            "url": url,
        })));
    }

    Err(AppError::Upload("Nenhum arquivo enviado.".to_string()))
}
