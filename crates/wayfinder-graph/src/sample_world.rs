//! A small valley map exercising every resolver feature.
//!
//! Nine outdoor areas, a farmhouse with a cellar, town interiors with a
//! back room, mine and skull cavern floors, volcano floors behind the
//! caldera substitution, a dead-end indoor cycle, and farm building
//! interiors that only the secondary enumeration reaches.

use wayfinder_types::HostLocation;

use crate::source::WorldSnapshot;

/// Build the sample valley as a [`WorldSnapshot`].
pub fn sample_world() -> WorldSnapshot {
    let locations = vec![
        // --- Outdoors ---
        HostLocation::outdoors("Farm")
            .with_warp("BusStop", 10, 23)
            .with_warp("Forest", 68, 1)
            .with_warp("FarmHouse", 3, 11),
        HostLocation::outdoors("BusStop")
            .with_warp("Farm", 79, 17)
            .with_warp("Town", 1, 54)
            .with_warp("Desert", 18, 27),
        HostLocation::outdoors("Town")
            .with_warp("BusStop", 34, 23)
            .with_warp("Beach", 38, 1)
            .with_warp("Mountain", 15, 40)
            .with_warp("Saloon", 14, 24)
            .with_warp("SeedShop", 6, 29),
        HostLocation::outdoors("Beach").with_warp("Town", 54, 103),
        HostLocation::outdoors("Mountain")
            .with_warp("Town", 81, 41)
            .with_warp("Mine", 18, 13),
        HostLocation::outdoors("Forest").with_warp("Farm", 41, 64),
        HostLocation::outdoors("Desert"),
        HostLocation::outdoors("IslandNorth").with_warp("VolcanoDungeon0", 31, 53),
        HostLocation::outdoors("Caldera").with_warp("VolcanoDungeon9", 30, 36),
        // --- Farm ---
        HostLocation::indoors("FarmHouse")
            .with_warp("Farm", 64, 15)
            .with_warp("Cellar", 3, 3),
        HostLocation::indoors("Cellar").with_warp("FarmHouse", 4, 25),
        // --- Town ---
        HostLocation::indoors("SaloonBackRoom").with_warp("Saloon", 20, 9),
        HostLocation::indoors("Saloon")
            .with_warp("SaloonBackRoom", 2, 2)
            .with_warp("Town", 45, 71),
        HostLocation::indoors("SeedShop").with_warp("Town", 43, 57),
        // --- Mines ---
        HostLocation::indoors("Mine")
            .with_warp("Mountain", 54, 6)
            .with_warp("UndergroundMine1", 6, 6),
        HostLocation::indoors("UndergroundMine1").with_warp("Mine", 67, 10),
        HostLocation::indoors("UndergroundMine87").with_warp("UndergroundMine88", 5, 5),
        HostLocation::indoors("SkullCave")
            .with_warp("Desert", 8, 7)
            .with_warp("UndergroundMine121", 4, 4),
        HostLocation::indoors("UndergroundMine131").with_warp("SkullCave", 3, 4),
        // --- Volcano ---
        HostLocation::indoors("VolcanoDungeon0").with_warp("IslandNorth", 40, 22),
        HostLocation::indoors("VolcanoDungeon9").with_warp("Caldera", 11, 36),
        // --- A sealed-off pair with no way out ---
        HostLocation::indoors("SecretWoodsHollow").with_warp("SecretWoodsBurrow", 4, 4),
        HostLocation::indoors("SecretWoodsBurrow").with_warp("SecretWoodsHollow", 6, 6),
    ];

    let building_interiors = vec![
        HostLocation::indoors("Coop").with_warp("Farm", 40, 12),
        HostLocation::indoors("Barn").with_warp("Farm", 52, 9),
        HostLocation::indoors("Shed").with_warp("Farm", 30, 18),
    ];

    WorldSnapshot::new(locations, building_interiors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::WorldSource;

    #[test]
    fn sample_world_has_both_enumerations() {
        let world = sample_world();
        assert_eq!(world.building_interiors().count(), 3);
        assert!(world.resolve("Farm").is_some_and(|l| l.outdoors));
        assert!(world.resolve("Coop").is_some());
        assert!(world.resolve("UndergroundMine88").is_none());
    }
}
