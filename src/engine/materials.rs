use serde::{Deserialize, Serialize};

use crate::config::{DeliveryTemplate, MaterialRates};

/// Bulk materials tracked by the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Cement,
    Steel,
    Sand,
    Bricks,
}

impl Material {
    pub const ALL: [Material; 4] = [
        Material::Cement,
        Material::Steel,
        Material::Sand,
        Material::Bricks,
    ];

    /// Key used in the `materials` map, unit included.
    pub fn key(&self) -> &'static str {
        match self {
            Material::Cement => "cement_bags",
            Material::Steel => "steel_kg",
            Material::Sand => "sand_tons",
            Material::Bricks => "bricks",
        }
    }
}

/// Whole-unit quantities for the full build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaterialEstimate {
    pub cement_bags: u64,
    pub steel_kg: u64,
    pub sand_tons: u64,
    pub bricks: u64,
}

impl MaterialEstimate {
    pub fn quantity(&self, material: Material) -> u64 {
        match material {
            Material::Cement => self.cement_bags,
            Material::Steel => self.steel_kg,
            Material::Sand => self.sand_tons,
            Material::Bricks => self.bricks,
        }
    }
}

pub fn estimate_materials(total_area: f64, rates: &MaterialRates) -> MaterialEstimate {
    let quantity = |material| (total_area * rates.rate(material)).floor() as u64;
    MaterialEstimate {
        cement_bags: quantity(Material::Cement),
        steel_kg: quantity(Material::Steel),
        sand_tons: quantity(Material::Sand),
        bricks: quantity(Material::Bricks),
    }
}

/// Quantity of one material arriving in a delivery week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryItem {
    pub material: Material,
    pub percent: u32,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryWeek {
    pub week: u32,
    pub items: Vec<DeliveryItem>,
    pub note: String,
}

/// Apply the weekly percentage templates to the material totals.
pub fn plan_deliveries(
    materials: &MaterialEstimate,
    templates: &[DeliveryTemplate],
) -> Vec<DeliveryWeek> {
    templates
        .iter()
        .map(|template| DeliveryWeek {
            week: template.week,
            items: template
                .allocations
                .iter()
                .map(|allocation| DeliveryItem {
                    material: allocation.material,
                    percent: allocation.percent,
                    quantity: share(materials.quantity(allocation.material), allocation.percent),
                })
                .collect(),
            note: template.note.clone(),
        })
        .collect()
}

/// `floor(quantity * percent / 100)` without intermediate overflow.
fn share(quantity: u64, percent: u32) -> u64 {
    let exact = u128::from(quantity) * u128::from(percent) / 100;
    u64::try_from(exact).unwrap_or(u64::MAX)
}
