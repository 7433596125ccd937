// Archivo: scheme_catalog.rs
// Propósito: catálogo estático de esquemas de subsidio con su banda de
// superficie (acres, inclusiva en ambos extremos).
use crate::scheme::{SponsorType, SubsidyScheme};

pub(crate) static SCHEMES: &[SubsidyScheme] = &[
  SubsidyScheme { id: "pm_kisan_small",
                  name: "PM-KISAN Small & Marginal Farmer Support",
                  sponsor_type: SponsorType::Central,
                  eligibility_label: "Land ≤ 2 acres",
                  min_land_acres: 0.0,
                  max_land_acres: 2.0,
                  benefit_amount_label: "₹18,000",
                  benefits: &["₹6,000 annual direct cash transfer",
                              "70% subsidy on certified seeds",
                              "Free soil health card",
                              "Crop insurance at 50% premium subsidy",
                              "Priority access to credit facilities"],
                  required_documents: &["Aadhaar Card", "Land Records", "Bank Account Details"] },
  SubsidyScheme { id: "rashtriya_krishi",
                  name: "Rashtriya Krishi Vikas Yojana (RKVY)",
                  sponsor_type: SponsorType::State,
                  eligibility_label: "Land 2-5 acres",
                  min_land_acres: 2.0,
                  max_land_acres: 5.0,
                  benefit_amount_label: "₹45,000",
                  benefits: &["60% subsidy on farm equipment",
                              "Irrigation infrastructure support",
                              "Market linkage facilitation",
                              "Storage subsidy up to 50%",
                              "Technical training programs"],
                  required_documents: &["Land Ownership Certificate", "Aadhaar Card", "Income Certificate"] },
  SubsidyScheme { id: "commercial_farming",
                  name: "Commercial Farming Excellence Program",
                  sponsor_type: SponsorType::Central,
                  eligibility_label: "Land > 5 acres",
                  min_land_acres: 5.0,
                  max_land_acres: 1000.0,
                  benefit_amount_label: "₹85,000",
                  benefits: &["Equipment subsidy up to 50%",
                              "Cold storage facility support",
                              "Export market facilitation",
                              "Processing unit establishment subsidy",
                              "Organic certification support"],
                  required_documents: &["Commercial Farming License", "Environmental Clearance", "Business Registration"] },
  SubsidyScheme { id: "digital_agriculture",
                  name: "Digital Agriculture Innovation Scheme",
                  sponsor_type: SponsorType::Private,
                  eligibility_label: "Tech-savvy progressive farmers",
                  min_land_acres: 1.0,
                  max_land_acres: 1000.0,
                  benefit_amount_label: "₹35,000",
                  benefits: &["Smart farming equipment subsidy",
                              "Precision agriculture support",
                              "Drone technology access",
                              "AI-based crop monitoring",
                              "Market price forecasting"],
                  required_documents: &["Digital Literacy Certificate", "Progressive Farmer ID", "Technology Adoption Agreement"] },
  SubsidyScheme { id: "organic_premium",
                  name: "Organic Farming Premium Support",
                  sponsor_type: SponsorType::State,
                  eligibility_label: "Organic certification holders",
                  min_land_acres: 0.5,
                  max_land_acres: 1000.0,
                  benefit_amount_label: "₹65,000",
                  benefits: &["Organic input subsidy 80%",
                              "Certification cost reimbursement",
                              "Premium market access guarantee",
                              "Export facilitation support",
                              "Organic brand development"],
                  required_documents: &["Organic Certification", "Soil Test Report", "Water Quality Certificate"] },
  SubsidyScheme { id: "climate_resilient",
                  name: "Climate Resilient Agriculture Program",
                  sponsor_type: SponsorType::Central,
                  eligibility_label: "Drought/flood prone areas",
                  min_land_acres: 1.0,
                  max_land_acres: 1000.0,
                  benefit_amount_label: "₹55,000",
                  benefits: &["Climate-smart infrastructure",
                              "Drought-resistant variety seeds",
                              "Weather insurance coverage",
                              "Emergency support fund",
                              "Resilience building training"],
                  required_documents: &["Vulnerability Assessment Certificate", "Disaster Damage Records", "Climate Zone Classification"] },
];
