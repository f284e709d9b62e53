pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Number of radians in one degree.
pub(crate) const RAD_PER_DEG: f64 = std::f64::consts::PI / 180.0;

/// Number of degrees in one radian.
pub(crate) const DEG_PER_RAD: f64 = 180.0 / std::f64::consts::PI;
