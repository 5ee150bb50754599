use std::collections::HashMap;

use crate::{
    models::{Car, ConfigCategory},
    services::feature_catalog::FeatureCatalog,
};

/// Cars offered by the demo storefront, in display order
pub fn demo_cars() -> Vec<Car> {
    vec![
        Car::new("roadster", "Apex Roadster", 5_499_000),
        Car::new("tourer", "Grand Tourer", 6_250_000),
        Car::new("city-ev", "Metro EV", 3_190_000),
        Car::new("trail", "Trail SUV", 4_780_000),
    ]
}

/// Feature scores of the demo cars
pub fn demo_feature_catalog() -> FeatureCatalog {
    FeatureCatalog::new()
        .with_car(
            "roadster",
            &[
                ("acceleration", 5),
                ("handling", 5),
                ("comfort", 2),
                ("efficiency", 2),
                ("safety", 3),
                ("interior", 4),
                ("exterior", 5),
                ("infotainment", 3),
            ],
        )
        .with_car(
            "tourer",
            &[
                ("acceleration", 4),
                ("handling", 3),
                ("comfort", 5),
                ("efficiency", 3),
                ("safety", 4),
                ("interior", 5),
                ("exterior", 4),
                ("infotainment", 5),
            ],
        )
        .with_car(
            "city-ev",
            &[
                ("acceleration", 3),
                ("handling", 3),
                ("comfort", 3),
                ("efficiency", 5),
                ("safety", 4),
                ("interior", 3),
                ("exterior", 3),
                ("infotainment", 4),
            ],
        )
        .with_car(
            "trail",
            &[
                ("acceleration", 2),
                ("handling", 2),
                ("comfort", 4),
                ("efficiency", 2),
                ("safety", 5),
                ("interior", 3),
                ("exterior", 3),
                ("infotainment", 3),
            ],
        )
}

/// Configuration categories of the demo cars, keyed by car id
pub fn demo_config_categories() -> HashMap<String, Vec<ConfigCategory>> {
    demo_cars()
        .into_iter()
        .map(|car| {
            let mut categories = vec![
                exterior_colors(),
                wheels(),
                interiors(),
                tech_packages(),
            ];
            // The city car ships with a single drivetrain tune
            if car.id != "city-ev" {
                categories.push(performance_packages());
            }
            (car.id, categories)
        })
        .collect()
}

fn exterior_colors() -> ConfigCategory {
    let mut category = ConfigCategory::new("exterior-color", "Exterior Color");
    category.add_option("pearl-white", "Pearl White", 0);
    category.add_option("silver", "Liquid Silver", 69_500);
    category.add_option("midnight-blue", "Midnight Blue", 69_500);
    category.add_option("red", "Racing Red", 120_000);
    category
}

fn wheels() -> ConfigCategory {
    let mut category = ConfigCategory::new("wheels", "Wheels");
    category.add_option("standard", "18\" Standard", 0);
    category.add_option("aero", "19\" Aero", 90_000);
    category.add_option("sport", "20\" Sport", 210_000);
    category
}

fn interiors() -> ConfigCategory {
    let mut category = ConfigCategory::new("interior", "Interior");
    category.add_option("cloth", "Woven Cloth", 0);
    category.add_option("black-leather", "Black Leather", 180_000);
    category.add_option("tan-leather", "Tan Leather", 180_000);
    category
}

fn tech_packages() -> ConfigCategory {
    let mut category = ConfigCategory::new("tech-package", "Technology Package");
    category.add_option("basic", "Essentials", 0);
    category.add_option("advanced-nav", "Advanced Navigation", 150_000);
    category.add_option("advanced-driver-assist", "Advanced Driver Assist", 320_000);
    category
}

fn performance_packages() -> ConfigCategory {
    let mut category = ConfigCategory::new("performance", "Performance");
    category.add_option("eco-tune", "Eco Tune", 0);
    category.add_option("balanced", "Balanced", 0);
    category.add_option("sport-tune", "Sport Tune", 450_000);
    category
}
