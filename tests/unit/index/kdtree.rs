//! Tests for the k-d tree color index and its agreement with the linear scan

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::index::{ColorIndex, KdTreeIndex, LinearIndex};
    use photomosaic::math::color::Color;
    use photomosaic::math::resample::solid;
    use photomosaic::spatial::tiles::{Tile, TilePreparer, TileSize};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tiles(colors: &[Color]) -> Vec<Tile> {
        let preparer = TilePreparer::new(TileSize::new(1, 1).unwrap());
        colors
            .iter()
            .map(|&color| preparer.prepare(&solid(1, 1, color)).unwrap())
            .collect()
    }

    fn random_color(rng: &mut StdRng, levels: u8) -> Color {
        // Coarse levels produce many exact ties
        let step = 255 / levels;
        Color::new(
            rng.random_range(0..=levels) * step,
            rng.random_range(0..=levels) * step,
            rng.random_range(0..=levels) * step,
        )
    }

    // Tests the nearest tile is found
    // Verified by never descending into the far subtree
    #[test]
    fn test_nearest_single() {
        let index = KdTreeIndex::build(tiles(&[
            Color::new(255, 0, 0),
            Color::new(0, 255, 0),
            Color::new(0, 0, 255),
            Color::new(255, 255, 255),
        ]))
        .unwrap();

        let result = index.nearest(Color::new(250, 10, 10), 1).unwrap();
        assert_eq!(result.first().map(|n| n.id), Some(0));

        let result = index.nearest(Color::new(240, 240, 250), 2).unwrap();
        let ids: Vec<usize> = result.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 0]);
    }

    // Tests duplicate colors resolve by insertion position
    // Verified by pruning subtrees at equal plane distance
    #[test]
    fn test_duplicate_colors_tie_break() {
        let gray = Color::new(128, 128, 128);
        let index = KdTreeIndex::build(tiles(&[gray; 9])).unwrap();

        let ids: Vec<usize> = index.nearest(gray, 9).unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, (0..9).collect::<Vec<_>>());

        let ids: Vec<usize> = index.nearest(gray, 3).unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    // Tests tree results match the linear scan for random pools and queries
    // Verified by breaking ties by tree visiting order
    #[test]
    fn test_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(7);

        for round in 0..40 {
            let size = rng.random_range(1..120);
            let levels = if round % 2 == 0 { 3 } else { 255 };
            let colors: Vec<Color> = (0..size).map(|_| random_color(&mut rng, levels)).collect();

            let linear = LinearIndex::build(tiles(&colors)).unwrap();
            let tree = KdTreeIndex::build(tiles(&colors)).unwrap();

            for _ in 0..20 {
                let target = random_color(&mut rng, levels);
                let k = rng.random_range(0..=size + 2);
                let result = tree.nearest(target, k).unwrap();

                assert_eq!(result.len(), k.min(size));
                assert!(result.windows(2).all(|pair| pair.first() <= pair.last()));
                assert_eq!(
                    result,
                    linear.nearest(target, k).unwrap(),
                    "pool of {size}, k = {k}, target {target:?}"
                );
            }
        }
    }

    // Tests the tree is balanced by median splits
    // Verified by splitting on the first element
    #[test]
    fn test_balanced_depth() {
        let colors: Vec<Color> = (0..255u8).map(|i| Color::new(i, i, i)).collect();
        let index = KdTreeIndex::build(tiles(&colors)).unwrap();

        assert_eq!(index.depth(), 8);
        assert_eq!(index.len(), 255);
    }

    // Tests oversized and zero k
    // Verified by returning k entries regardless of pool size
    #[test]
    fn test_k_bounds() {
        let index = KdTreeIndex::build(tiles(&[Color::new(1, 2, 3), Color::new(3, 2, 1)])).unwrap();

        assert_eq!(index.nearest(Color::default(), 5).unwrap().len(), 2);
        assert!(index.nearest(Color::default(), 0).unwrap().is_empty());
    }

    // Tests empty pools are rejected at build and query time
    // Verified by returning an empty candidate list
    #[test]
    fn test_empty_pool() {
        assert!(matches!(KdTreeIndex::build(Vec::new()), Err(MosaicError::EmptyTileSet)));
        assert!(matches!(
            KdTreeIndex::default().nearest(Color::default(), 1),
            Err(MosaicError::NoCandidates)
        ));
        assert_eq!(KdTreeIndex::default().depth(), 0);
    }
}
