//! 收据文档服务 - 业务能力层
//!
//! 负责收据 HTML 包装、文件落盘、把截图嵌入 PDF

use std::path::Path;

use lopdf::content::Operation;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use crate::error::{AppError, AppResult, ReceiptError};

/// 图片距页面边缘的留白（pt）
const PAGE_MARGIN: f32 = 36.0;

/// 页面没有 MediaBox 时按 Letter 尺寸处理
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// 把收据元素的 innerHTML 包装成完整的 HTML 文档
pub fn wrap_receipt_html(inner_html: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Receipt</title></head>\n<body>\n{inner_html}\n</body>\n</html>\n"
    )
}

/// 写入文件，自动创建父目录
pub async fn write_artifact(path: &Path, bytes: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
    debug!("已写入 {} ({} 字节)", path.display(), bytes.len());
    Ok(())
}

/// 把图片嵌入 PDF 第一页
///
/// 图片按比例缩放到页面可用宽度内，靠上居中放置。
/// `source_pdf` 与 `output_pdf` 可以是同一个文件。
pub fn embed_image_into_pdf(image_path: &Path, source_pdf: &Path, output_pdf: &Path) -> AppResult<()> {
    let image = image::open(image_path)
        .map_err(|e| {
            AppError::Receipt(ReceiptError::ImageDecodeFailed {
                path: image_path.display().to_string(),
                source: Box::new(e),
            })
        })?
        .to_rgb8();
    let (width, height) = image.dimensions();

    let source_name = source_pdf.display().to_string();
    let mut doc = Document::load(source_pdf).map_err(|e| AppError::pdf_failed(&source_name, e))?;

    let page_id = doc
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or_else(|| AppError::Receipt(ReceiptError::NoPages { path: source_name.clone() }))?;

    let mut image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        image.into_raw(),
    );
    image_stream
        .compress()
        .map_err(|e| AppError::pdf_failed(&source_name, e))?;
    let image_id = doc.add_object(image_stream);
    let image_name = format!("RobotPreview{}", image_id.0);

    doc.add_xobject(page_id, image_name.as_bytes(), image_id)
        .map_err(|e| AppError::pdf_failed(&source_name, e))?;

    let page_size = page_size(&doc, page_id);
    let placement = fit_image(page_size, (width as f32, height as f32));

    let mut content = doc
        .get_and_decode_page_content(page_id)
        .map_err(|e| AppError::pdf_failed(&source_name, e))?;
    content.operations.extend(draw_image_ops(&image_name, placement));
    let encoded = content
        .encode()
        .map_err(|e| AppError::pdf_failed(&source_name, e))?;
    doc.change_page_content(page_id, encoded)
        .map_err(|e| AppError::pdf_failed(&source_name, e))?;

    doc.save(output_pdf)
        .map_err(|e| AppError::file_write_failed(output_pdf.display().to_string(), e))?;

    debug!(
        "已将 {} 嵌入 {} ({}x{} -> {:.0}x{:.0}pt)",
        image_path.display(),
        output_pdf.display(),
        width,
        height,
        placement.width,
        placement.height
    );
    Ok(())
}

/// 图片在页面上的位置与尺寸（PDF 坐标，原点在左下角）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// 计算图片位置：不放大，宽高都不超过可用区域，水平居中，贴着上边距
pub fn fit_image(page: (f32, f32), image: (f32, f32)) -> Placement {
    let (page_w, page_h) = page;
    let (img_w, img_h) = (image.0.max(1.0), image.1.max(1.0));

    let avail_w = (page_w - 2.0 * PAGE_MARGIN).max(1.0);
    let avail_h = (page_h - 2.0 * PAGE_MARGIN).max(1.0);
    let scale = (avail_w / img_w).min(avail_h / img_h).min(1.0);

    let width = img_w * scale;
    let height = img_h * scale;
    Placement {
        x: (page_w - width) / 2.0,
        y: page_h - PAGE_MARGIN - height,
        width,
        height,
    }
}

fn draw_image_ops(name: &str, p: Placement) -> Vec<Operation> {
    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                Object::Real(p.width.into()),
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(p.height.into()),
                Object::Real(p.x.into()),
                Object::Real(p.y.into()),
            ],
        ),
        Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
        Operation::new("Q", vec![]),
    ]
}

fn page_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let media_box = doc
        .get_object(page_id)
        .and_then(Object::as_dict)
        .and_then(|page| page.get(b"MediaBox"))
        .and_then(Object::as_array);

    let Ok(values) = media_box else {
        return DEFAULT_PAGE_SIZE;
    };
    let numbers: Vec<f32> = values.iter().filter_map(as_number).collect();
    match numbers.as_slice() {
        [x0, y0, x1, y1] => ((x1 - x0).abs(), (y1 - y0).abs()),
        _ => DEFAULT_PAGE_SIZE,
    }
}

fn as_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

/// 文档中图片 XObject 的数量
pub fn count_embedded_images(path: &Path) -> AppResult<usize> {
    let doc = Document::load(path).map_err(|e| AppError::pdf_failed(path.display().to_string(), e))?;
    let count = doc
        .objects
        .values()
        .filter(|obj| match obj {
            Object::Stream(stream) => matches!(
                stream.dict.get(b"Subtype"),
                Ok(Object::Name(name)) if name.as_slice() == b"Image"
            ),
            _ => false,
        })
        .count();
    Ok(count)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use lopdf::content::Content;
    use std::io::Cursor;

    /// 生成只有一页空白内容的 PDF
    pub(crate) fn blank_pdf_bytes() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content = Content { operations: vec![] };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {},
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, ImageFormat::Png).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_embed_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("1.pdf");
        let png = dir.path().join("1.png");
        std::fs::write(&pdf, blank_pdf_bytes()).unwrap();
        std::fs::write(&png, png_bytes(20, 40)).unwrap();

        assert_eq!(count_embedded_images(&pdf).unwrap(), 0);
        embed_image_into_pdf(&png, &pdf, &pdf).unwrap();
        assert_eq!(count_embedded_images(&pdf).unwrap(), 1);

        let doc = Document::load(&pdf).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = doc.get_and_decode_page_content(page_id).unwrap();
        assert!(content.operations.iter().any(|op| op.operator == "Do"));
    }

    #[test]
    fn test_embedded_image_is_deflated() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("2.pdf");
        let png = dir.path().join("2.png");
        std::fs::write(&pdf, blank_pdf_bytes()).unwrap();
        std::fs::write(&png, png_bytes(200, 300)).unwrap();

        embed_image_into_pdf(&png, &pdf, &pdf).unwrap();

        let doc = Document::load(&pdf).unwrap();
        let image = doc
            .objects
            .values()
            .find_map(|obj| match obj {
                Object::Stream(stream) if stream.dict.get(b"Subtype").and_then(Object::as_name_str).ok() == Some("Image") => {
                    Some(stream)
                }
                _ => None,
            })
            .expect("应包含图片");
        assert_eq!(image.filters().unwrap(), vec!["FlateDecode".to_string()]);
        assert!(image.content.len() < 200 * 300 * 3);
    }

    #[test]
    fn test_missing_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("1.pdf");
        std::fs::write(&pdf, blank_pdf_bytes()).unwrap();

        let err = embed_image_into_pdf(&dir.path().join("nope.png"), &pdf, &pdf).unwrap_err();
        assert!(matches!(err, AppError::Receipt(ReceiptError::ImageDecodeFailed { .. })));
    }

    #[test]
    fn test_not_a_pdf_fails() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("1.pdf");
        let png = dir.path().join("1.png");
        std::fs::write(&pdf, b"<html>not a pdf</html>").unwrap();
        std::fs::write(&png, png_bytes(4, 4)).unwrap();

        let err = embed_image_into_pdf(&png, &pdf, &pdf).unwrap_err();
        assert!(matches!(err, AppError::Receipt(ReceiptError::PdfFailed { .. })));
    }

    #[test]
    fn test_fit_image_keeps_small_images_unscaled() {
        let p = fit_image((612.0, 792.0), (100.0, 50.0));
        assert_eq!((p.width, p.height), (100.0, 50.0));
        assert_eq!(p.x, 256.0);
        assert_eq!(p.y, 792.0 - PAGE_MARGIN - 50.0);
    }

    #[test]
    fn test_fit_image_scales_large_images() {
        let p = fit_image((612.0, 792.0), (1080.0, 2160.0));
        assert!(p.width <= 612.0 - 2.0 * PAGE_MARGIN + 0.01);
        assert!(p.height <= 792.0 - 2.0 * PAGE_MARGIN + 0.01);
        assert!((p.height / p.width - 2.0).abs() < 1e-3);
        assert!(p.y >= PAGE_MARGIN - 0.01);
    }

    #[test]
    fn test_wrap_receipt_html() {
        let html = wrap_receipt_html("<h3>Receipt</h3><p>RSB-ROBO-ORDER-1</p>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<meta charset=\"utf-8\">"));
        assert!(html.contains("<p>RSB-ROBO-ORDER-1</p>"));
    }
}
