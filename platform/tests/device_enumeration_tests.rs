use ntfsidx_platform::fixed_drive_letters;

#[test]
fn fixed_drive_letters_returns_a_mask() {
    // Whatever the host reports, this must not panic, and on a platform
    // with no raw-volume concept it must report an empty mask rather than
    // fabricating drives that can't actually be opened.
    let mask = fixed_drive_letters();

    #[cfg(not(any(windows, target_os = "linux", target_os = "macos")))]
    assert_eq!(mask, 0);

    #[cfg(any(windows, target_os = "linux", target_os = "macos"))]
    let _ = mask;
}

#[cfg(not(windows))]
#[test]
fn raw_device_open_always_fails_off_windows() {
    use ntfsidx_platform::RawDevice;

    let result = RawDevice::open('C');
    assert!(result.is_err());
}
