//! # 解码与重采样流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → 正方形图标”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低超大输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸
//! 2. 按像素与内存上限快速拒绝
//! 3. 完整解码（整次运行只解码一次）
//! 4. 每档尺寸用 `fast_image_resize` 卷积重采样，失败时回退 `image::resize_exact`
//! 5. 校验输出宽高与目标边长一致、颜色模式与源图一致
//!
//! 灰度、灰度+透明、16 位源图都按各自的像素类型重采样，不会被转换成 RGB(A)8。
//!
//! 非正方形源图会被直接拉伸为正方形，不做裁剪或留边。

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageReader, Luma, LumaA, Rgb, Rgba};
use std::io::Cursor;

use super::source::{RawImageData, SourceImage};
use super::{IconConfig, IconError, IconGenerator};

impl IconGenerator {
    /// 将原始字节解码为源图。
    pub(crate) fn decode_source(
        &self,
        raw: RawImageData,
        config: &IconConfig,
    ) -> Result<SourceImage, IconError> {
        image::guess_format(&raw.bytes)
            .map_err(|e| IconError::Decode(format!("不支持的图片格式：{}", e)))?;

        let (header_width, header_height) = Self::read_header_dimensions(&raw.bytes)?;
        Self::check_decode_budget(config, header_width, header_height)?;

        let decoded = image::load_from_memory(&raw.bytes)
            .map_err(|e| IconError::Decode(format!("图片解码失败：{}", e)))?;

        let (width, height) = decoded.dimensions();
        Self::check_decode_budget(config, width, height)?;

        if width == 0 || height == 0 {
            return Err(IconError::Decode(format!("图片尺寸无效：{}x{}", width, height)));
        }

        if width != height {
            log::warn!("📐 源图不是正方形（{}x{}），输出将被拉伸", width, height);
        }

        log::info!(
            "✅ 源图解码成功 - 来源: {} 尺寸: {}x{} 颜色: {:?}",
            raw.source_hint,
            width,
            height,
            decoded.color()
        );

        Ok(SourceImage {
            image: decoded,
            source_hint: raw.source_hint,
        })
    }

    /// 只解析图片头，拿到宽高后再决定是否完整解码。
    fn read_header_dimensions(bytes: &[u8]) -> Result<(u32, u32), IconError> {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| IconError::Decode(format!("无法识别图片格式：{}", e)))?
            .into_dimensions()
            .map_err(|e| IconError::Decode(format!("无法读取图片尺寸：{}", e)))
    }

    /// 像素数与 RGBA 内存估算两项上限，一次乘法同时校验。
    fn check_decode_budget(config: &IconConfig, width: u32, height: u32) -> Result<(), IconError> {
        let pixels = u64::from(width) * u64::from(height);
        if pixels > config.max_decoded_pixels {
            return Err(IconError::ResourceLimit(format!(
                "图片像素过大：{}x{}（限制：{} 像素）",
                width, height, config.max_decoded_pixels
            )));
        }

        let estimated_bytes = pixels.saturating_mul(4);
        if estimated_bytes > config.max_decoded_bytes {
            return Err(IconError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated_bytes as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }

    /// 将源图重采样为 `size x size` 的正方形，颜色模式与源图一致。
    pub(crate) fn resize_square(
        &self,
        source: &SourceImage,
        size: u32,
        config: &IconConfig,
    ) -> Result<DynamicImage, IconError> {
        if size == 0 {
            return Err(IconError::InvalidFormat("图标边长必须大于 0".to_string()));
        }

        let (width, height) = source.image.dimensions();
        log::debug!(
            "🧩 重采样：{}x{} -> {}x{}（filter={:?} color={:?}）",
            width,
            height,
            size,
            size,
            config.resize_filter,
            source.image.color()
        );

        let resized = match Self::fast_pixel_type(&source.image) {
            Some(pixel_type) => {
                match Self::resize_with_fast_image_resize(
                    &source.image,
                    pixel_type,
                    size,
                    config.resize_filter,
                ) {
                    Ok(resized) => resized,
                    Err(err) => {
                        log::warn!(
                            "⚠️ fast_image_resize 重采样失败，回退 image::resize_exact：{}",
                            err
                        );
                        source.image.resize_exact(size, size, config.resize_filter)
                    }
                }
            }
            // 浮点像素等 fast_image_resize 不覆盖的格式
            None => source.image.resize_exact(size, size, config.resize_filter),
        };

        if resized.dimensions() != (size, size) || resized.color() != source.image.color() {
            return Err(IconError::Encode(format!(
                "重采样输出异常：{:?} {:?}（期望 {}x{} {:?}）",
                resized.dimensions(),
                resized.color(),
                size,
                size,
                source.image.color()
            )));
        }

        Ok(resized)
    }

    /// 源图颜色模式对应的 `fast_image_resize` 像素类型。
    fn fast_pixel_type(image: &DynamicImage) -> Option<fr::PixelType> {
        match image {
            DynamicImage::ImageLuma8(_) => Some(fr::PixelType::U8),
            DynamicImage::ImageLumaA8(_) => Some(fr::PixelType::U8x2),
            DynamicImage::ImageRgb8(_) => Some(fr::PixelType::U8x3),
            DynamicImage::ImageRgba8(_) => Some(fr::PixelType::U8x4),
            DynamicImage::ImageLuma16(_) => Some(fr::PixelType::U16),
            DynamicImage::ImageLumaA16(_) => Some(fr::PixelType::U16x2),
            DynamicImage::ImageRgb16(_) => Some(fr::PixelType::U16x3),
            DynamicImage::ImageRgba16(_) => Some(fr::PixelType::U16x4),
            _ => None,
        }
    }

    /// 以源图自身的像素类型做卷积重采样，带透明通道的类型会自动预乘 alpha。
    fn resize_with_fast_image_resize(
        image: &DynamicImage,
        pixel_type: fr::PixelType,
        size: u32,
        filter: FilterType,
    ) -> Result<DynamicImage, IconError> {
        let (src_width, src_height) = image.dimensions();
        let src_image = fr::images::Image::from_vec_u8(
            src_width,
            src_height,
            image.as_bytes().to_vec(),
            pixel_type,
        )
        .map_err(|e| IconError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(size, size, pixel_type);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(Self::to_fast_filter(filter)));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| IconError::Encode(format!("fast_image_resize 执行失败：{}", e)))?;

        Self::rebuild_dynamic_image(pixel_type, size, dst_image.into_vec())
            .ok_or_else(|| IconError::Encode("fast_image_resize 输出缓冲长度异常".to_string()))
    }

    /// 把重采样后的原始字节装回与像素类型对应的 `DynamicImage` 变体。
    ///
    /// 16 位样本按本机字节序存放，与 `DynamicImage::as_bytes` 的布局一致。
    fn rebuild_dynamic_image(
        pixel_type: fr::PixelType,
        size: u32,
        bytes: Vec<u8>,
    ) -> Option<DynamicImage> {
        fn samples16(bytes: &[u8]) -> Vec<u16> {
            bytes
                .chunks_exact(2)
                .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
                .collect()
        }

        match pixel_type {
            fr::PixelType::U8 => ImageBuffer::<Luma<u8>, _>::from_raw(size, size, bytes)
                .map(DynamicImage::ImageLuma8),
            fr::PixelType::U8x2 => ImageBuffer::<LumaA<u8>, _>::from_raw(size, size, bytes)
                .map(DynamicImage::ImageLumaA8),
            fr::PixelType::U8x3 => ImageBuffer::<Rgb<u8>, _>::from_raw(size, size, bytes)
                .map(DynamicImage::ImageRgb8),
            fr::PixelType::U8x4 => ImageBuffer::<Rgba<u8>, _>::from_raw(size, size, bytes)
                .map(DynamicImage::ImageRgba8),
            fr::PixelType::U16 => {
                ImageBuffer::<Luma<u16>, _>::from_raw(size, size, samples16(&bytes))
                    .map(DynamicImage::ImageLuma16)
            }
            fr::PixelType::U16x2 => {
                ImageBuffer::<LumaA<u16>, _>::from_raw(size, size, samples16(&bytes))
                    .map(DynamicImage::ImageLumaA16)
            }
            fr::PixelType::U16x3 => {
                ImageBuffer::<Rgb<u16>, _>::from_raw(size, size, samples16(&bytes))
                    .map(DynamicImage::ImageRgb16)
            }
            fr::PixelType::U16x4 => {
                ImageBuffer::<Rgba<u16>, _>::from_raw(size, size, samples16(&bytes))
                    .map(DynamicImage::ImageRgba16)
            }
            _ => None,
        }
    }

    fn to_fast_filter(filter: FilterType) -> fr::FilterType {
        match filter {
            FilterType::Nearest => fr::FilterType::Box,
            FilterType::Triangle => fr::FilterType::Bilinear,
            FilterType::CatmullRom => fr::FilterType::CatmullRom,
            FilterType::Gaussian => fr::FilterType::Mitchell,
            FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, format)
            .expect("failed to encode test image");
        cursor.into_inner()
    }

    fn raw(bytes: Vec<u8>) -> RawImageData {
        RawImageData {
            bytes,
            source_hint: "test".to_string(),
        }
    }

    fn gradient_rgba(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x % 255) as u8, (y % 255) as u8, ((x + y) % 255) as u8, 200])
        }))
    }

    fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 255) as u8, (y % 255) as u8, ((x * y) % 255) as u8])
        }))
    }

    #[test]
    fn decode_source_keeps_original_dimensions() {
        let generator = IconGenerator::new(IconConfig::default()).expect("generator init failed");
        let config = generator.config().clone();

        let source = generator
            .decode_source(raw(encode(gradient_rgb(320, 200), ImageFormat::Png)), &config)
            .expect("decode should succeed");

        assert_eq!(source.image.dimensions(), (320, 200));
    }

    #[test]
    fn decode_source_rejects_text_payload() {
        let generator = IconGenerator::new(IconConfig::default()).expect("generator init failed");
        let config = generator.config().clone();

        let result = generator.decode_source(raw(b"hello, not an image".to_vec()), &config);

        assert!(matches!(result, Err(IconError::Decode(_))));
    }

    #[test]
    fn decode_source_rejects_truncated_png() {
        let generator = IconGenerator::new(IconConfig::default()).expect("generator init failed");
        let config = generator.config().clone();
        let mut bytes = encode(gradient_rgb(64, 64), ImageFormat::Png);
        bytes.truncate(bytes.len() / 2);

        let result = generator.decode_source(raw(bytes), &config);

        assert!(matches!(result, Err(IconError::Decode(_))));
    }

    #[test]
    fn decode_source_rejects_too_many_pixels() {
        let mut config = IconConfig::default();
        config.max_decoded_pixels = 10_000;
        let generator = IconGenerator::new(config).expect("generator init failed");
        let config = generator.config().clone();

        let bytes = encode(gradient_rgb(200, 200), ImageFormat::Png);
        let result = generator.decode_source(raw(bytes), &config);

        assert!(matches!(result, Err(IconError::ResourceLimit(_))));
    }

    #[test]
    fn resize_square_produces_exact_dimensions_for_each_filter() {
        let generator = IconGenerator::new(IconConfig::default()).expect("generator init failed");
        let mut config = generator.config().clone();
        let source = generator
            .decode_source(raw(encode(gradient_rgba(300, 120), ImageFormat::Png)), &config)
            .expect("decode should succeed");

        for filter in [
            image::imageops::FilterType::Lanczos3,
            image::imageops::FilterType::CatmullRom,
            image::imageops::FilterType::Triangle,
            image::imageops::FilterType::Gaussian,
        ] {
            config.resize_filter = filter;
            for size in [16, 48, 128] {
                let resized = generator
                    .resize_square(&source, size, &config)
                    .expect("resize should succeed");
                assert_eq!(resized.dimensions(), (size, size));
            }
        }
    }

    #[test]
    fn resize_square_keeps_source_color_mode() {
        let generator = IconGenerator::new(IconConfig::default()).expect("generator init failed");
        let config = generator.config().clone();

        let cases = [
            DynamicImage::ImageLuma8(ImageBuffer::from_fn(64, 64, |x, _| Luma([(x * 4) as u8]))),
            DynamicImage::ImageLumaA8(ImageBuffer::from_pixel(40, 40, LumaA([90, 128]))),
            gradient_rgb(64, 64),
            gradient_rgba(64, 64),
            DynamicImage::ImageLuma16(ImageBuffer::from_fn(50, 30, |x, y| {
                Luma([(x * 1000 + y * 7) as u16])
            })),
            DynamicImage::ImageRgba16(ImageBuffer::from_pixel(
                33,
                33,
                Rgba([60_000u16, 1_000, 30_000, 65_535]),
            )),
        ];

        for image in cases {
            let expected = image.color();
            let source = generator
                .decode_source(raw(encode(image, ImageFormat::Png)), &config)
                .expect("decode should succeed");
            assert_eq!(source.image.color(), expected);

            for size in [16, 48, 128] {
                let resized = generator
                    .resize_square(&source, size, &config)
                    .expect("resize should succeed");
                assert_eq!(resized.color(), expected);
                assert_eq!(resized.dimensions(), (size, size));
            }
        }
    }

    #[test]
    fn resize_square_keeps_solid_sixteen_bit_gray_stable() {
        let generator = IconGenerator::new(IconConfig::default()).expect("generator init failed");
        let config = generator.config().clone();
        let solid = DynamicImage::ImageLuma16(ImageBuffer::from_pixel(200, 200, Luma([40_000u16])));
        let source = generator
            .decode_source(raw(encode(solid, ImageFormat::Png)), &config)
            .expect("decode should succeed");

        let resized = generator.resize_square(&source, 16, &config).expect("resize should succeed");
        let gray = resized.as_luma16().expect("icon should stay 16-bit gray");

        for pixel in gray.pixels() {
            assert!((pixel.0[0] as i32 - 40_000).abs() <= 2);
        }
    }

    #[test]
    fn resize_square_keeps_solid_color_stable() {
        let generator = IconGenerator::new(IconConfig::default()).expect("generator init failed");
        let config = generator.config().clone();
        let solid = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(512, 512, Rgb([30, 144, 255])));
        let source = generator
            .decode_source(raw(encode(solid, ImageFormat::Png)), &config)
            .expect("decode should succeed");

        let resized = generator.resize_square(&source, 16, &config).expect("resize should succeed");
        let rgb = resized.to_rgb8();

        for pixel in rgb.pixels() {
            for (actual, expected) in pixel.0.iter().zip([30u8, 144, 255]) {
                assert!((*actual as i16 - expected as i16).abs() <= 1);
            }
        }
    }

    #[test]
    fn resize_square_rejects_zero_size() {
        let generator = IconGenerator::new(IconConfig::default()).expect("generator init failed");
        let config = generator.config().clone();
        let source = generator
            .decode_source(raw(encode(gradient_rgb(8, 8), ImageFormat::Png)), &config)
            .expect("decode should succeed");

        let result = generator.resize_square(&source, 0, &config);

        assert!(matches!(result, Err(IconError::InvalidFormat(_))));
    }

    #[test]
    fn to_fast_filter_maps_lanczos() {
        assert!(matches!(
            IconGenerator::to_fast_filter(image::imageops::FilterType::Lanczos3),
            fr::FilterType::Lanczos3
        ));
    }
}
