mod tests {
    use tempest_tree::{
        color::{BLACK, BLUE, RED, Rgb},
        geometry::{LedRange, color_wipe_led, fill_led_range, led_index_from_range, set_led},
        layout::{LANE_COUNT, TreeLayout},
    };

    #[test]
    fn test_led_index_from_range_forward() {
        let cases = [
            (0, 1, 0.0, 0),
            (0, 1, 0.4999, 0),
            (0, 1, 0.5, 1),
            (0, 1, 0.9, 1),
            (0, 1, 1.0, 1),
            (0, 10, 0.0, 0),
            (0, 10, 0.0499, 0),
            (0, 10, 0.05, 1),
            (0, 10, 0.1499, 1),
            (0, 10, 0.15, 2),
            (0, 10, 0.2, 2),
            (0, 10, 0.2499, 2),
            (0, 10, 0.25, 3),
            (0, 10, 0.99, 10),
            (0, 10, 1.0, 10),
            (5, 15, 0.2499, 7),
        ];
        for (start, end, position, expected) in cases {
            assert_eq!(
                led_index_from_range(start, end, position),
                expected,
                "({start}, {end}, {position})"
            );
        }
    }

    #[test]
    fn test_led_index_from_range_reversed() {
        let cases = [
            (1, 0, 0.0, 1),
            (1, 0, 0.4999, 1),
            (1, 0, 0.5, 0),
            (1, 0, 0.9, 0),
            (1, 0, 1.0, 0),
            (10, 0, 0.0, 10),
            (10, 0, 1.0, 0),
            (15, 5, 0.0, 15),
            (15, 5, 1.0, 5),
            (15, 5, 0.5, 10),
        ];
        for (start, end, position, expected) in cases {
            assert_eq!(
                led_index_from_range(start, end, position),
                expected,
                "({start}, {end}, {position})"
            );
        }
    }

    #[test]
    fn test_led_index_from_range_truncates_toward_zero() {
        // Slightly negative positions still land on the start LED
        assert_eq!(led_index_from_range(0, 10, -0.06), 0);
        assert_eq!(led_index_from_range(10, 0, -0.06), 10);
        assert_eq!(led_index_from_range(0, 10, -0.16), -1);
        assert_eq!(led_index_from_range(10, 0, -0.16), 11);
    }

    #[test]
    fn test_led_index_from_range_monotonic() {
        let mut forward = led_index_from_range(60, 80, 0.0);
        let mut reversed = led_index_from_range(215, 195, 0.0);
        for step in 1..=1000 {
            let position = step as f32 / 1000.0;
            let next_forward = led_index_from_range(60, 80, position);
            let next_reversed = led_index_from_range(215, 195, position);
            assert!(next_forward >= forward);
            assert!(next_reversed <= reversed);
            forward = next_forward;
            reversed = next_reversed;
        }
        assert_eq!(forward, 80);
        assert_eq!(reversed, 195);
    }

    #[test]
    fn test_fill_led_range_is_direction_agnostic() {
        let mut forward = [BLACK; 12];
        let mut reversed = [BLACK; 12];
        fill_led_range(&mut forward, 3, 8, RED);
        fill_led_range(&mut reversed, 8, 3, RED);
        assert_eq!(forward, reversed);
        assert_eq!(forward.iter().filter(|led| **led == RED).count(), 6);
        assert_eq!(forward[2], BLACK);
        assert_eq!(forward[9], BLACK);
    }

    #[test]
    fn test_writes_outside_buffer_are_skipped() {
        let mut leds = [BLACK; 4];
        set_led(&mut leds, -1, RED);
        set_led(&mut leds, 4, RED);
        fill_led_range(&mut leds, 2, 9, BLUE);
        assert_eq!(leds, [BLACK, BLACK, BLUE, BLUE]);
    }

    #[test]
    fn test_color_wipe_endpoints() {
        let mut leds = [BLACK; 10];
        color_wipe_led(&mut leds, 0, 9, RED, BLUE, 0.0);
        assert!(leds.iter().all(|led| *led == BLUE));

        color_wipe_led(&mut leds, 0, 9, RED, BLUE, 1.0);
        assert!(leds.iter().all(|led| *led == RED));

        color_wipe_led(&mut leds, 9, 0, RED, BLUE, 0.0);
        assert!(leds.iter().all(|led| *led == BLUE));

        color_wipe_led(&mut leds, 9, 0, RED, BLUE, 1.0);
        assert!(leds.iter().all(|led| *led == RED));
    }

    #[test]
    fn test_color_wipe_boundary_follows_t() {
        let lit = |leds: &[Rgb]| leds.iter().filter(|led| **led == RED).count();

        let mut previous = 0;
        for step in 0..=20 {
            let t = step as f32 / 20.0;
            let mut leds = [BLACK; 10];
            color_wipe_led(&mut leds, 0, 9, RED, BLUE, t);
            let count = lit(&leds);
            assert_eq!(count, libm::roundf(t * 10.0) as usize);
            assert!(count >= previous);
            previous = count;
        }

        // A reversed wipe starts from the high end
        let mut leds = [BLACK; 10];
        color_wipe_led(&mut leds, 9, 0, RED, BLUE, 0.3);
        assert_eq!(&leds[7..], &[RED; 3]);
        assert_eq!(&leds[..7], &[BLUE; 7]);
    }

    #[test]
    fn test_led_range_between() {
        let range = LedRange::between(215, 195);
        assert_eq!(range.start, 195);
        assert_eq!(range.count, 21);
        assert_eq!(range.end(), 216);
        assert!(range.contains(215));
        assert!(!range.contains(216));
    }

    #[test]
    fn test_default_layout() {
        let layout = TreeLayout::DEFAULT;
        assert_eq!(layout.led_count(), 216);
        assert_eq!(layout.path_count(), 30);
        assert_eq!(layout.lanes.len(), LANE_COUNT);
        assert!(layout.lanes.iter().all(|lane| lane.count() == 21));

        assert_eq!(layout.path_position_of(layout.lanes[0]), 0.0);
        assert_eq!(layout.path_position_of(layout.lanes[6]), 1.0);
        assert_eq!(layout.path_led(0.0), 30);
        assert_eq!(layout.path_led(1.0), 59);

        let lane = layout.lanes[2];
        assert_eq!(lane.led_index(0.0), 170);
        assert_eq!(lane.led_index(1.0), 150);
    }
}
