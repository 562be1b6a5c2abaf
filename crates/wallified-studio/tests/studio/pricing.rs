use wallified_core::Rupees;
use wallified_settings::Config;
use wallified_studio::{LayoutMode, Studio};

use crate::support::{decoded, studio_with};

#[test]
fn test_separate_layout_prices_per_sheet() {
    let (mut studio, _) = studio_with(&[(3000, 2000); 3]);
    studio.set_borderless(true);
    studio.set_layout_mode(LayoutMode::Separate);
    assert_eq!(studio.sheet_count(), 3);
    assert_eq!(studio.price(), Rupees(3 * (299 + 9)));

    studio.set_layout_mode(LayoutMode::Combined);
    assert_eq!(studio.sheet_count(), 1);
    assert_eq!(studio.price(), Rupees(299 + 9));
}

#[test]
fn test_price_follows_config() {
    let mut config = Config::default();
    config.pricing.base_price = Rupees(349);
    config.pricing.borderless_surcharge = Rupees(20);
    let mut studio = Studio::new(&config);
    studio.add_images(vec![decoded(3000, 2000)]).unwrap();

    assert_eq!(studio.price(), Rupees(349));
    studio.set_borderless(true);
    assert_eq!(studio.price(), Rupees(369));
}

#[test]
fn test_low_resolution_is_priced_normally() {
    let (studio, _) = studio_with(&[(400, 300)]);
    assert!(!studio.resolution_advisories().is_empty());
    assert_eq!(studio.price(), Rupees(299));
    assert!(studio.design_specification().is_ok());
}
