//! Tests for phase progress tracking

#[cfg(test)]
mod tests {
    use photomosaic::io::progress::ProgressManager;

    // Tests starting a phase finishes the previous one
    // Verified by replacing the bar without recording it
    #[test]
    fn test_phases_are_sequential() {
        let mut pm = ProgressManager::new();
        assert!(!pm.is_active());

        pm.start_phase("Loading", 3);
        pm.set_position(3);
        assert!(pm.is_active());

        pm.start_phase("Placing", 10);
        pm.set_position(4);
        pm.finish();

        assert!(!pm.is_active());
        let names: Vec<&str> = pm
            .completed_phases()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, vec!["Loading", "Placing"]);
    }

    // Tests ticks advance only the running phase
    // Verified by ticking the finished phase
    #[test]
    fn test_tick_advances_current_phase() {
        let mut pm = ProgressManager::new();
        pm.tick();
        assert_eq!(pm.position(), None);

        pm.start_phase("Preparing", 4);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| pm.tick());
            }
        });
        assert_eq!(pm.position(), Some(4));

        pm.start_phase("Placing", 2);
        assert_eq!(pm.position(), Some(0));
    }

    // Tests finishing without a phase is a no-op
    // Verified by recording empty phases
    #[test]
    fn test_finish_without_phase() {
        let mut pm = ProgressManager::default();
        pm.set_position(5);
        pm.finish_phase();
        pm.finish();

        assert!(pm.completed_phases().is_empty());
    }
}
