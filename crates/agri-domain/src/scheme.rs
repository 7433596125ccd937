// scheme.rs
use crate::scheme_catalog::SCHEMES;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SponsorType {
  Central,
  State,
  Private,
}

impl fmt::Display for SponsorType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      SponsorType::Central => "Central Government",
      SponsorType::State => "State Government",
      SponsorType::Private => "Private Partnership",
    };
    write!(f, "{}", s)
  }
}

/// Esquema de subsidio. La elegibilidad depende solo de la superficie.
#[derive(Debug, Serialize)]
pub struct SubsidyScheme {
  pub id: &'static str,
  pub name: &'static str,
  pub sponsor_type: SponsorType,
  pub eligibility_label: &'static str,
  pub min_land_acres: f64,
  pub max_land_acres: f64,
  pub benefit_amount_label: &'static str,
  pub benefits: &'static [&'static str],
  pub required_documents: &'static [&'static str],
}

impl SubsidyScheme {
  /// `min <= land <= max`, inclusivo en ambos extremos.
  pub fn is_eligible(&self, land_area_acres: f64) -> bool {
    self.min_land_acres <= land_area_acres && land_area_acres <= self.max_land_acres
  }

  fn band_width(&self) -> f64 {
    self.max_land_acres - self.min_land_acres
  }
}

/// Catálogo completo en orden estático.
pub fn all_schemes() -> &'static [SubsidyScheme] {
  SCHEMES
}

pub fn find_scheme(id: &str) -> Option<&'static SubsidyScheme> {
  SCHEMES.iter().find(|s| s.id == id)
}

/// Esquemas cuya banda contiene `land_area_acres`, en orden del catálogo.
pub fn eligible_schemes(land_area_acres: f64) -> Vec<&'static SubsidyScheme> {
  SCHEMES.iter().filter(|s| s.is_eligible(land_area_acres)).collect()
}

/// Igual que `eligible_schemes` pero ordenado por cercanía: bandas más
/// estrechas primero; empates conservan el orden del catálogo.
pub fn rank_eligible(land_area_acres: f64) -> Vec<&'static SubsidyScheme> {
  let mut list = eligible_schemes(land_area_acres);
  list.sort_by(|a, b| a.band_width().total_cmp(&b.band_width()));
  list
}
