//! Tests for stepwise mosaic building, configuration checks and blending

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use photomosaic::MosaicError;
    use photomosaic::algorithm::executor::{MosaicBuilder, MosaicConfig, Placement, assemble};
    use photomosaic::algorithm::placement::PolicyConfig;
    use photomosaic::math::color::Color;
    use photomosaic::math::resample::solid;
    use photomosaic::spatial::grid::{GridCell, GridRounding};
    use photomosaic::spatial::tiles::{Tile, TilePreparer, TileSize};

    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    fn tiles(size: TileSize, colors: &[Color]) -> Vec<Tile> {
        let preparer = TilePreparer::new(size);
        colors
            .iter()
            .map(|&color| preparer.prepare(&solid(size.width(), size.height(), color)).unwrap())
            .collect()
    }

    fn config(width: u32, height: u32) -> MosaicConfig {
        MosaicConfig::new(TileSize::new(width, height).unwrap(), PolicyConfig::default())
    }

    // Left half red, right half blue
    fn split_target(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        })
    }

    // Tests placements follow the column-major walk with matching tiles
    // Verified by walking rows first
    #[test]
    fn test_place_next_walks_column_major() {
        let config = config(2, 2);
        let mut builder =
            MosaicBuilder::new(tiles(config.tile_size, &[BLUE, RED]), split_target(4, 4), &config, 1).unwrap();

        assert_eq!(builder.total_cells(), 4);
        while builder.place_next().unwrap() {}
        assert!(!builder.place_next().unwrap());

        assert_eq!(
            builder.placements(),
            &[
                Placement { cell: GridCell::new(0, 0), tile: 1 },
                Placement { cell: GridCell::new(0, 1), tile: 1 },
                Placement { cell: GridCell::new(1, 0), tile: 0 },
                Placement { cell: GridCell::new(1, 1), tile: 0 },
            ]
        );
        assert_eq!(builder.canvas().get_pixel(0, 3), &Rgb([255, 0, 0]));
        assert_eq!(builder.canvas().get_pixel(3, 0), &Rgb([0, 0, 255]));
    }

    // Tests truncation leaves remainder pixels black
    // Verified by stretching the last tile over the remainder
    #[test]
    fn test_truncated_remainder_is_unpainted() {
        let config = config(2, 2);
        let target = solid(5, 3, RED);
        let mosaic = MosaicBuilder::new(tiles(config.tile_size, &[RED]), target, &config, 1)
            .unwrap()
            .finish()
            .unwrap();

        assert_eq!(mosaic.dimensions(), (5, 3));
        assert_eq!(mosaic.get_pixel(3, 1), &Rgb([255, 0, 0]));
        assert_eq!(mosaic.get_pixel(4, 0), &Rgb([0, 0, 0]));
        assert_eq!(mosaic.get_pixel(0, 2), &Rgb([0, 0, 0]));
    }

    // Tests cover rounding paints the remainder with clipped tiles
    // Verified by skipping cells beyond the truncated grid
    #[test]
    fn test_cover_rounding_paints_edges() {
        let config = MosaicConfig {
            rounding: GridRounding::Cover,
            ..config(2, 2)
        };
        let mosaic = MosaicBuilder::new(tiles(config.tile_size, &[RED]), solid(5, 3, RED), &config, 1)
            .unwrap()
            .finish()
            .unwrap();

        assert!(mosaic.pixels().all(|p| *p == Rgb([255, 0, 0])));
    }

    // Tests the final blend mixes the target over the canvas
    // Verified by blending with the canvas as overlay
    #[test]
    fn test_finish_blends_target() {
        let config = MosaicConfig {
            blend: 0.5,
            ..config(2, 2)
        };
        let mosaic = MosaicBuilder::new(tiles(config.tile_size, &[BLUE]), solid(2, 2, RED), &config, 1)
            .unwrap()
            .finish()
            .unwrap();

        assert!(mosaic.pixels().all(|p| *p == Rgb([128, 0, 128])));
    }

    // Tests invalid configurations fail before any work
    // Verified by validating lazily during placement
    #[test]
    fn test_invalid_configuration() {
        let size = TileSize::new(2, 2).unwrap();
        let bad_blend = MosaicConfig {
            blend: 1.5,
            ..config(2, 2)
        };
        assert!(matches!(
            MosaicBuilder::new(tiles(size, &[RED]), solid(4, 4, RED), &bad_blend, 1),
            Err(MosaicError::InvalidParameter { parameter: "blend", .. })
        ));

        let bad_policy = MosaicConfig::new(size, PolicyConfig::AntiCluster { nearest: 0 });
        assert!(matches!(
            MosaicBuilder::new(tiles(size, &[RED]), solid(4, 4, RED), &bad_policy, 1),
            Err(MosaicError::InvalidPolicyConfig { .. })
        ));
    }

    // Tests empty pools, mismatched tiles and tiny targets are rejected
    // Verified by removing the tile size check
    #[test]
    fn test_rejects_bad_inputs() {
        let config = config(2, 2);

        assert!(matches!(
            MosaicBuilder::new(Vec::new(), solid(4, 4, RED), &config, 1),
            Err(MosaicError::EmptyTileSet)
        ));
        assert!(matches!(
            MosaicBuilder::new(tiles(TileSize::new(3, 3).unwrap(), &[RED]), solid(4, 4, RED), &config, 1),
            Err(MosaicError::InvalidParameter { parameter: "tile", .. })
        ));
        assert!(matches!(
            MosaicBuilder::new(tiles(config.tile_size, &[RED]), solid(1, 4, RED), &config, 1),
            Err(MosaicError::DegenerateSize { .. })
        ));
        assert!(matches!(
            assemble(&[], &solid(4, 4, RED), &config, 1),
            Err(MosaicError::EmptyTileSet)
        ));
    }

    // Tests assemble prepares raw images of any size
    // Verified by requiring raw images at tile size
    #[test]
    fn test_assemble_prepares_raw_tiles() {
        let raws = vec![solid(7, 3, BLUE), solid(10, 10, RED)];
        let mosaic = assemble(&raws, &split_target(8, 4), &config(2, 2), 9).unwrap();

        assert_eq!(mosaic, split_target(8, 4));
    }

    // Tests a truncated grid matches each cell against its own pixels
    // Verified by sampling colors from the stretched full target
    #[test]
    fn test_truncated_cells_match_their_own_pixels() {
        let green = Color::new(0, 255, 0);
        let config = config(24, 24);
        let target = RgbImage::from_fn(70, 24, |x, _| match x {
            0..24 => Rgb([0, 255, 0]),
            24..48 => Rgb([255, 0, 0]),
            _ => Rgb([0, 0, 255]),
        });

        let mosaic = MosaicBuilder::new(tiles(config.tile_size, &[RED, green, BLUE]), target, &config, 1)
            .unwrap()
            .finish()
            .unwrap();

        assert_eq!(mosaic.get_pixel(10, 10), &Rgb([0, 255, 0]));
        assert_eq!(mosaic.get_pixel(30, 10), &Rgb([255, 0, 0]));
        assert_eq!(mosaic.get_pixel(60, 10), &Rgb([0, 0, 0]));
    }

    // Tests distinct tile usage counts each pool tile once
    // Verified by counting placements instead of tiles
    #[test]
    fn test_distinct_tiles_used() {
        let config = config(2, 2);
        let mut builder = MosaicBuilder::new(
            tiles(config.tile_size, &[BLUE, RED, Color::new(0, 255, 0)]),
            split_target(8, 4),
            &config,
            1,
        )
        .unwrap();

        assert_eq!(builder.distinct_tiles_used(), 0);
        builder.place_all().unwrap();

        assert_eq!(builder.placed_cells(), 8);
        assert_eq!(builder.distinct_tiles_used(), 2);
    }
}
