mod tests {
    use myrtio_breathing::gamma::{CIE_LUT, CIE_LUT_SIZE, cie_lightness, correct};

    #[test]
    fn test_cie_lightness_endpoints() {
        assert_eq!(cie_lightness(0), 0);
        assert_eq!(cie_lightness(u16::MAX), u16::MAX);
    }

    #[test]
    fn test_cie_lightness_knee() {
        // Linear segment below 8%, cubic above; no dip at the seam
        assert_eq!(cie_lightness(5243), 580);
        assert_eq!(cie_lightness(5244), 580);
        assert!(cie_lightness(5300) >= 580);
    }

    #[test]
    fn test_cie_lightness_is_monotonic() {
        let mut previous = 0;
        for v in 0..=u16::MAX {
            let current = cie_lightness(v);
            assert!(current >= previous, "dip at {v}: {current} < {previous}");
            previous = current;
        }
    }

    #[test]
    fn test_lut_matches_function() {
        assert_eq!(CIE_LUT.len(), CIE_LUT_SIZE);
        assert_eq!(correct(0), 0);
        assert_eq!(correct(1), 28);
        assert_eq!(correct(127), 11963);
        assert_eq!(correct(128), 12178);
        assert_eq!(correct(254), 64872);
        assert_eq!(correct(255), u16::MAX);
        for (i, value) in CIE_LUT.iter().enumerate() {
            assert_eq!(*value, cie_lightness(u16::try_from(i * 257).unwrap()));
        }
    }

    #[test]
    fn test_lut_is_monotonic() {
        assert!(CIE_LUT.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
