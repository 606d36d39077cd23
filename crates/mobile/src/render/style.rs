use ecoroute_stops::models::types::StopCategory;
use palette::Srgba;

/// Marker style for one annotation.
pub struct Style {
    border_color: Srgba<f32>,
    border_width_px: f32,
    fill: Option<Srgba<f32>>,
}

impl Style {
    pub fn transparent() -> Self {
        Self {
            border_color: Srgba::new(0.0, 0.0, 0.0, 0.0),
            border_width_px: 0.0,
            fill: None,
        }
    }

    pub fn solid_color(fill_color: Srgba<f32>) -> Self {
        Self {
            border_color: Srgba::new(0.0, 0.0, 0.0, 0.0),
            border_width_px: 0.0,
            fill: Some(fill_color),
        }
    }

    pub fn with_border(mut self, border_width_px: f32, border_color: Srgba<f32>) -> Self {
        self.border_color = border_color;
        self.border_width_px = border_width_px;
        self
    }

    pub fn border_color(&self) -> Srgba<f32> {
        self.border_color
    }

    pub fn border_width_px(&self) -> f32 {
        self.border_width_px
    }

    pub fn fill(&self) -> Option<Srgba<f32>> {
        self.fill
    }
}

/// Marker style for a stop category: translucent white disc with a colored
/// ring telling the modes apart at a glance.
pub fn style_for(category: StopCategory) -> Style {
    let border = match category {
        StopCategory::Bus => Srgba::new(0.0, 0.0, 1.0, 1.0),
        StopCategory::Tram => Srgba::new(0.0, 1.0, 0.0, 1.0),
        StopCategory::Train => Srgba::new(1.0, 0.0, 0.0, 1.0),
        StopCategory::Bike => Srgba::new(1.0, 0.65, 0.0, 1.0),
        StopCategory::Unknown => Srgba::new(0.5, 0.5, 0.5, 1.0),
    };

    Style::solid_color(Srgba::new(1.0, 1.0, 1.0, 0.9)).with_border(3.0, border)
}
