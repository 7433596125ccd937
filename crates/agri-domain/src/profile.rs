// profile.rs
use crate::{CropType, DomainError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Campos editables del perfil. Se usan para marcar los que llegan por el
/// hand-off de identidad y quedan en solo lectura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
  Name,
  NationalId,
  Mobile,
  LandArea,
  Location,
  BankAccount,
  ProfilePhoto,
}

impl fmt::Display for ProfileField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      ProfileField::Name => "name",
      ProfileField::NationalId => "national_id",
      ProfileField::Mobile => "mobile",
      ProfileField::LandArea => "land_area_acres",
      ProfileField::Location => "location",
      ProfileField::BankAccount => "bank_account_ref",
      ProfileField::ProfilePhoto => "profile_photo",
    };
    write!(f, "{}", s)
  }
}

/// Perfil del agricultor. Las cadenas vacías significan "no proporcionado";
/// nunca se rellenan con valores inventados.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmerProfile {
  name: String,
  national_id: String,
  mobile: String,
  land_area_acres: f64,
  location: String,
  bank_account_ref: String,
  selected_crop: Option<CropType>,
  profile_photo: Option<String>,
  #[serde(default)]
  locked_fields: BTreeSet<ProfileField>,
}

impl FarmerProfile {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn national_id(&self) -> &str {
    &self.national_id
  }

  pub fn mobile(&self) -> &str {
    &self.mobile
  }

  pub fn land_area_acres(&self) -> f64 {
    self.land_area_acres
  }

  pub fn location(&self) -> &str {
    &self.location
  }

  pub fn bank_account_ref(&self) -> &str {
    &self.bank_account_ref
  }

  pub fn selected_crop(&self) -> Option<CropType> {
    self.selected_crop
  }

  pub fn profile_photo(&self) -> Option<&str> {
    self.profile_photo.as_deref()
  }

  pub fn is_locked(&self, field: ProfileField) -> bool {
    self.locked_fields.contains(&field)
  }

  pub fn locked_fields(&self) -> impl Iterator<Item = ProfileField> + '_ {
    self.locked_fields.iter().copied()
  }

  /// Marca un campo como solo lectura (valor de origen externo).
  pub fn lock(&mut self, field: ProfileField) {
    self.locked_fields.insert(field);
  }

  fn ensure_editable(&self, field: ProfileField) -> Result<(), DomainError> {
    if self.is_locked(field) {
      return Err(DomainError::ReadOnlyField(field.to_string()));
    }
    Ok(())
  }

  pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
    self.ensure_editable(ProfileField::Name)?;
    self.name = name.into().trim().to_string();
    Ok(())
  }

  pub fn set_national_id(&mut self, id: impl Into<String>) -> Result<(), DomainError> {
    self.ensure_editable(ProfileField::NationalId)?;
    self.national_id = id.into().trim().to_string();
    Ok(())
  }

  pub fn set_mobile(&mut self, mobile: impl Into<String>) -> Result<(), DomainError> {
    self.ensure_editable(ProfileField::Mobile)?;
    self.mobile = mobile.into().trim().to_string();
    Ok(())
  }

  pub fn set_land_area_acres(&mut self, acres: f64) -> Result<(), DomainError> {
    self.ensure_editable(ProfileField::LandArea)?;
    if !acres.is_finite() || acres < 0.0 {
      return Err(DomainError::ValidationError(format!("Superficie inválida: {}", acres)));
    }
    self.land_area_acres = acres;
    Ok(())
  }

  pub fn set_location(&mut self, location: impl Into<String>) -> Result<(), DomainError> {
    self.ensure_editable(ProfileField::Location)?;
    self.location = location.into().trim().to_string();
    Ok(())
  }

  pub fn set_bank_account_ref(&mut self, account: impl Into<String>) -> Result<(), DomainError> {
    self.ensure_editable(ProfileField::BankAccount)?;
    self.bank_account_ref = account.into().trim().to_string();
    Ok(())
  }

  pub fn set_profile_photo(&mut self, artifact_key: Option<String>) -> Result<(), DomainError> {
    self.ensure_editable(ProfileField::ProfilePhoto)?;
    self.profile_photo = artifact_key;
    Ok(())
  }

  /// Solo la sesión de capacitación cambia el cultivo seleccionado.
  pub fn set_selected_crop(&mut self, crop: Option<CropType>) {
    self.selected_crop = crop;
  }

  /// Identificador nacional enmascarado para mostrar: conserva los primeros
  /// cuatro caracteres (`1234-XXXX-XXXX`).
  pub fn masked_national_id(&self) -> String {
    let prefix: String = self.national_id.chars().filter(|c| !c.is_whitespace()).take(4).collect();
    if prefix.is_empty() {
      return "XXXX-XXXX-XXXX".to_string();
    }
    format!("{}-XXXX-XXXX", prefix)
  }
}
