/// Decoded RGBA8 image ready for upload.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl LoadedImage {
    /// Decode PNG or JPEG bytes.
    pub fn decode(bytes: &[u8]) -> anyhow::Result<Self> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            anyhow::bail!("image has zero size");
        }
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    /// Shrink so neither side exceeds `max_dimension`, keeping the aspect ratio.
    /// Images already within the limit are returned unchanged.
    pub fn fit_within(self, max_dimension: u32) -> Self {
        let max_dimension = max_dimension.max(1);
        let longest = self.width.max(self.height);
        if longest <= max_dimension {
            return self;
        }
        let scale = max_dimension as f64 / longest as f64;
        let width = ((self.width as f64 * scale).round() as u32).clamp(1, max_dimension);
        let height = ((self.height as f64 * scale).round() as u32).clamp(1, max_dimension);
        let (src_w, src_h) = (self.width, self.height);
        let Some(src) = image::RgbaImage::from_raw(src_w, src_h, self.rgba) else {
            log::warn!("[image] {}x{} buffer has the wrong length", src_w, src_h);
            return Self::blank();
        };
        let resized =
            image::imageops::resize(&src, width, height, image::imageops::FilterType::Triangle);
        log::info!(
            "[image] downscaled {}x{} to {}x{}",
            src_w,
            src_h,
            width,
            height
        );
        Self {
            width,
            height,
            rgba: resized.into_raw(),
        }
    }

    /// 1×1 fully transparent placeholder.
    pub fn blank() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: vec![0; 4],
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
