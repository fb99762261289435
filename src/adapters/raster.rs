use crate::core::card::ShareCard;
use crate::domain::ports::Rasterizer;
use crate::utils::error::{GreenError, Result};
use async_trait::async_trait;
use resvg::usvg::{Options, Tree};
use std::sync::{Arc, LazyLock};
use tiny_skia::{Pixmap, Transform};

static OPTIONS: LazyLock<Options<'static>> = LazyLock::new(|| {
    let mut fontdb = resvg::usvg::fontdb::Database::new();
    fontdb.load_system_fonts();

    Options {
        fontdb: Arc::new(fontdb),
        ..Options::default()
    }
});

/// 用 resvg 把分享卡 SVG 轉成 PNG
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRasterizer;

impl SvgRasterizer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_blocking(svg: &str, pixel_ratio: f32) -> Result<Vec<u8>> {
        let tree = Tree::from_str(svg, &OPTIONS).map_err(|e| GreenError::RenderFailure {
            message: format!("invalid card template: {}", e),
        })?;

        let size = tree.size();
        let width = (size.width() * pixel_ratio).ceil() as u32;
        let height = (size.height() * pixel_ratio).ceil() as u32;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| GreenError::RenderFailure {
            message: format!("cannot allocate {}x{} canvas", width, height),
        })?;
        resvg::render(
            &tree,
            Transform::from_scale(pixel_ratio, pixel_ratio),
            &mut pixmap.as_mut(),
        );

        pixmap.encode_png().map_err(|e| GreenError::RenderFailure {
            message: format!("PNG encoding failed: {}", e),
        })
    }
}

#[async_trait]
impl Rasterizer for SvgRasterizer {
    async fn rasterize(&self, card: &ShareCard, pixel_ratio: f32) -> Result<Vec<u8>> {
        let svg = card.svg.clone();
        tracing::debug!(
            "Rasterizing {}x{} card at {}x",
            card.width,
            card.height,
            pixel_ratio
        );

        // 光柵化是 CPU 密集工作，不佔用 async 執行緒
        tokio::task::spawn_blocking(move || Self::render_blocking(&svg, pixel_ratio))
            .await
            .map_err(|e| GreenError::RenderFailure {
                message: format!("render task aborted: {}", e),
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ImpactSnapshot;

    fn png_dimensions(png: &[u8]) -> (u32, u32) {
        let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        (width, height)
    }

    #[tokio::test]
    async fn test_rasterize_card_at_double_ratio() {
        let snapshot = ImpactSnapshot::new("Alex", 123.4).unwrap();
        let card = ShareCard::from_snapshot(&snapshot);

        let png = SvgRasterizer::new().rasterize(&card, 2.0).await.unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(png_dimensions(&png), (2160, 2160));
    }

    #[test]
    fn test_invalid_svg_is_render_failure() {
        let err = SvgRasterizer::render_blocking("<not-svg", 1.0).unwrap_err();
        assert!(matches!(err, GreenError::RenderFailure { .. }));
    }
}
