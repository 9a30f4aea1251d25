///
/// AnalyticsConfig
///

#[derive(Clone, Copy, Debug)]
pub struct AnalyticsConfig {
    /// Reference year for fixed-year economic joins.
    ///
    /// Procedures that compare countries against each other pin this single
    /// year so every row describes the same observation period; procedures
    /// that want the best available data per country use the most-recent
    /// policy instead.
    pub reference_year: u16,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            reference_year: 2024,
        }
    }
}

///
/// OvercrowdingParams
///

#[derive(Clone, Copy, Debug)]
pub struct OvercrowdingParams {
    /// Population-per-km² floor for a country to count as high-density.
    pub density_threshold: f64,
    /// GDP-per-capita ceiling (USD) below which a dense country is flagged.
    pub gdp_threshold: f64,
}

impl Default for OvercrowdingParams {
    fn default() -> Self {
        Self {
            density_threshold: 300.0,
            gdp_threshold: 5_000.0,
        }
    }
}
