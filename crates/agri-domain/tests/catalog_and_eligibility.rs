use agri_domain::{all_schemes, eligible_schemes, find_scheme, find_step, rank_eligible, step_position, CropType, SponsorType};
use std::collections::HashSet;

#[test]
fn sequence_lengths_match_curriculum() {
  assert_eq!(CropType::Potato.steps().len(), 5);
  assert_eq!(CropType::Onion.steps().len(), 5);
  assert_eq!(CropType::Tomato.steps().len(), 5);
  assert_eq!(CropType::Wheat.steps().len(), 6);
}

#[test]
fn every_step_is_well_formed_and_unique() {
  let mut ids = HashSet::new();
  for crop in CropType::ALL {
    for (i, step) in crop.steps().iter().enumerate() {
      assert!(ids.insert(step.id), "id duplicado {}", step.id);
      assert_eq!(step.crop, crop);
      assert!(step.duration_days > 0, "{} sin duración", step.id);
      assert!(!step.checklist.is_empty());
      assert!(!step.proof_requirement.is_empty());
      assert_eq!(step.id, format!("{}-{}", crop.key(), i + 1));
      assert_eq!(find_step(step.id).map(|s| s.title), Some(step.title));
      assert_eq!(step_position(step.id), Some(i));
    }
  }
  assert!(find_step("rice-1").is_none());
}

#[test]
fn total_days_per_crop() {
  assert_eq!(CropType::Potato.total_days(), 90);
  assert_eq!(CropType::Onion.total_days(), 120);
  assert_eq!(CropType::Tomato.total_days(), 100);
  assert_eq!(CropType::Wheat.total_days(), 150);
}

#[test]
fn eligibility_is_exactly_the_inclusive_band() {
  // barrido de superficies, incluidos los bordes de cada banda
  let mut samples: Vec<f64> = vec![0.0, 0.25, 0.5, 1.0, 1.5, 1.99, 2.0, 2.01, 3.0, 5.0, 6.0, 999.9, 1000.0, 1000.5];
  for s in all_schemes() {
    samples.push(s.min_land_acres);
    samples.push(s.max_land_acres);
  }
  for land in samples {
    let got: HashSet<&str> = eligible_schemes(land).iter().map(|s| s.id).collect();
    for s in all_schemes() {
      let expected = s.min_land_acres <= land && land <= s.max_land_acres;
      assert_eq!(got.contains(s.id), expected, "land={} scheme={}", land, s.id);
    }
    assert_eq!(rank_eligible(land).len(), got.len());
  }
}

#[test]
fn small_farm_gets_pm_kisan_but_not_commercial() {
  let ids: Vec<&str> = eligible_schemes(1.5).iter().map(|s| s.id).collect();
  assert!(ids.contains(&"pm_kisan_small"));
  assert!(!ids.contains(&"commercial_farming"));
  assert!(!ids.contains(&"rashtriya_krishi"));
}

#[test]
fn six_acres_excludes_small_bands_and_includes_commercial() {
  let ids: Vec<&str> = eligible_schemes(6.0).iter().map(|s| s.id).collect();
  assert!(!ids.contains(&"pm_kisan_small"));
  assert!(!ids.contains(&"rashtriya_krishi"));
  assert!(ids.contains(&"commercial_farming"));
}

#[test]
fn scheme_lookup_and_sponsor_labels() {
  let s = find_scheme("commercial_farming").expect("scheme");
  assert_eq!(s.sponsor_type, SponsorType::Central);
  assert_eq!(s.sponsor_type.to_string(), "Central Government");
  assert_eq!(s.required_documents.len(), 3);
  assert!(find_scheme("nope").is_none());
}
