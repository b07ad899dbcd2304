use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::taxonomy::Taxonomy;

/// 从 TOML 文件加载难点分类表
pub async fn load_taxonomy(toml_file_path: &Path) -> AppResult<Taxonomy> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file(toml_file_path.display().to_string(), e))?;

    let taxonomy = Taxonomy::from_toml_str(&content)?;

    info!(
        "成功加载分类表 {}: {} 个分类",
        toml_file_path.display(),
        taxonomy.len()
    );

    Ok(taxonomy)
}

/// 有自定义文件时加载自定义分类表，否则使用内置分类表
///
/// 自定义文件存在但无法解析时返回错误，不会悄悄退回内置分类表
pub async fn load_taxonomy_or_builtin(path: Option<&str>) -> AppResult<Taxonomy> {
    match path {
        Some(path) => load_taxonomy(Path::new(path)).await,
        None => {
            let taxonomy = Taxonomy::builtin();
            info!("使用内置分类表: {} 个分类", taxonomy.len());
            Ok(taxonomy)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaxonomyError;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("language_audit_{}_{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_load_taxonomy_from_file() {
        let path = temp_path("taxonomy.toml");
        fs::write(
            &path,
            "[[category]]\nname = \"writing\"\ntriggers = [\"Emails\", \"essays\"]\n",
        )
        .await
        .unwrap();

        let taxonomy = load_taxonomy(&path).await.unwrap();
        assert_eq!(taxonomy.len(), 1);
        assert_eq!(taxonomy.get("writing").unwrap().triggers(), &["emails", "essays"]);

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let err = load_taxonomy(&temp_path("missing.toml")).await.unwrap_err();
        assert!(matches!(err, AppError::File { .. }));
    }

    #[tokio::test]
    async fn test_invalid_file_is_not_replaced_by_builtin() {
        let path = temp_path("invalid.toml");
        fs::write(&path, "[[category]]\nname = \"empty\"\ntriggers = []\n")
            .await
            .unwrap();

        let err = load_taxonomy_or_builtin(path.to_str())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Taxonomy(TaxonomyError::EmptyCategory { .. })
        ));

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_builtin_when_no_path() {
        let taxonomy = load_taxonomy_or_builtin(None).await.unwrap();
        assert_eq!(taxonomy, Taxonomy::builtin());
    }
}
