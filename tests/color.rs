mod tests {
    use tempest_tree::color::{
        BLACK, BLUE, CYAN, RED, Rgb, WHITE, YELLOW, cross_fade_color, odd_width, ramp_pattern,
        rgb_from_u32, scale_color, scale_pattern,
    };

    #[test]
    fn test_named_colors() {
        assert_eq!(RED, Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(CYAN, Rgb { r: 0, g: 255, b: 255 });
        assert_eq!(YELLOW, rgb_from_u32(0xFFFF33));
        assert_eq!(rgb_from_u32(0x123456), Rgb { r: 0x12, g: 0x34, b: 0x56 });
    }

    #[test]
    fn test_scale_color_truncates() {
        assert_eq!(scale_color(0.5, WHITE), Rgb { r: 127, g: 127, b: 127 });
        assert_eq!(scale_color(0.0, WHITE), BLACK);
        assert_eq!(scale_color(1.0, BLUE), BLUE);
        assert_eq!(
            scale_color(0.3, Rgb { r: 10, g: 100, b: 3 }),
            Rgb { r: 3, g: 30, b: 0 }
        );
    }

    #[test]
    fn test_cross_fade_color() {
        assert_eq!(cross_fade_color(0.0, RED, BLUE), RED);
        assert_eq!(cross_fade_color(1.0, RED, BLUE), BLUE);
        assert_eq!(
            cross_fade_color(0.5, RED, BLUE),
            Rgb { r: 127, g: 0, b: 127 }
        );
        assert_eq!(
            cross_fade_color(0.25, BLACK, WHITE),
            Rgb { r: 63, g: 63, b: 63 }
        );
    }

    #[test]
    fn test_odd_width() {
        assert_eq!(odd_width(4), 5);
        assert_eq!(odd_width(5), 5);
        assert_eq!(odd_width(0), 1);
    }

    #[test]
    fn test_ramp_pattern_is_symmetric() {
        let pattern = ramp_pattern::<16>(WHITE, 5);
        assert_eq!(pattern.len(), 5);
        assert_eq!(pattern[2], WHITE);
        assert_eq!(pattern[0], pattern[4]);
        assert_eq!(pattern[1], pattern[3]);
        assert_eq!(pattern[0], Rgb { r: 85, g: 85, b: 85 });
        assert_eq!(pattern[1], Rgb { r: 170, g: 170, b: 170 });
    }

    #[test]
    fn test_ramp_pattern_even_width_and_never_black() {
        let pattern = ramp_pattern::<16>(RED, 6);
        assert_eq!(pattern.len(), 7);
        assert!(pattern.iter().all(|color| color.r > 0));
        assert!(pattern.windows(2).take(3).all(|pair| pair[0].r < pair[1].r));
    }

    #[test]
    fn test_scale_pattern() {
        let mut pattern = [WHITE, RED];
        scale_pattern(0.5, &mut pattern);
        assert_eq!(pattern, [Rgb { r: 127, g: 127, b: 127 }, Rgb { r: 127, g: 0, b: 0 }]);
    }
}
