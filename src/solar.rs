//! Sun elevation for a given instant and position.
//!
//! Low-precision solar coordinates (mean longitude, mean anomaly, equation of
//! center, apparent longitude and obliquity) feed a declination and an
//! equation of time, from which the hour angle and finally the elevation
//! follow. Accurate to well under a degree for dates around the present.

use chrono::{DateTime, Datelike, Timelike, Utc};

const J2000: f64 = 2_451_545.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;
const MINUTES_PER_DAY: f64 = 1440.0;
/// Fixed obliquity used by the equation-of-time series.
const EOT_OBLIQUITY: f64 = 23.44;

/// Elevation of the sun above the horizon in degrees, negative below it.
///
/// `timestamp`'s UTC calendar fields are used as-is. Latitude and longitude
/// are signed degrees; results outside `[-90, 90]` / `[-180, 180]` are not
/// meaningful.
pub fn solar_elevation(timestamp: DateTime<Utc>, latitude: f64, longitude: f64) -> f64 {
    let hour = f64::from(timestamp.hour())
        + f64::from(timestamp.minute()) / 60.0
        + f64::from(timestamp.second()) / 3600.0;

    let jd = julian_day(
        timestamp.year(),
        timestamp.month(),
        timestamp.day(),
        hour,
    );
    let t = (jd - J2000) / DAYS_PER_CENTURY;

    let l0 = t
        .mul_add(0.000_303_2, 36_000.769_83)
        .mul_add(t, 280.466_46)
        .rem_euclid(360.0);
    let m = 0.000_153_7f64
        .mul_add(-t, 35_999.050_29)
        .mul_add(t, 357.529_11);
    let e = 0.000_000_126_7f64
        .mul_add(t, 0.000_042_037)
        .mul_add(-t, 0.016_708_634);

    let c = 0.000_014f64.mul_add(t, 0.004_817).mul_add(-t, 1.914_602) * sin_deg(m)
        + 0.000_101f64.mul_add(-t, 0.019_993) * sin_deg(2.0 * m)
        + 0.000_289 * sin_deg(3.0 * m);
    let true_longitude = l0 + c;

    let omega = 1934.136f64.mul_add(-t, 125.04);
    let apparent_longitude = 0.004_78f64.mul_add(-sin_deg(omega), true_longitude - 0.005_69);

    let epsilon0 = 0.013_004_2f64.mul_add(-t, 23.439_291);
    let epsilon = 0.002_56f64.mul_add(cos_deg(omega), epsilon0);

    let declination = (sin_deg(epsilon) * sin_deg(apparent_longitude))
        .asin()
        .to_degrees();

    let time_offset = 4.0f64.mul_add(longitude, -equation_of_time(l0, e, m));
    let true_solar_time =
        (hour.mul_add(60.0, time_offset) + MINUTES_PER_DAY) % MINUTES_PER_DAY / 4.0;
    let hour_angle = if true_solar_time < 0.0 {
        true_solar_time + 180.0
    } else {
        true_solar_time - 180.0
    };

    (sin_deg(latitude) * sin_deg(declination)
        + cos_deg(latitude) * cos_deg(declination) * cos_deg(hour_angle))
    .clamp(-1.0, 1.0)
    .asin()
    .to_degrees()
}

/// Julian Day for a Gregorian calendar date and fractional UTC hour.
pub fn julian_day(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let (mut y, mut m) = (f64::from(year), f64::from(month));
    if m <= 2.0 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + f64::from(day) + b - 1524.5
        + hour / 24.0
}

/// Equation of time in minutes from mean longitude `l0` and mean anomaly `m`
/// (degrees) and orbital eccentricity `e`.
pub fn equation_of_time(l0: f64, e: f64, m: f64) -> f64 {
    let y = tan_deg(EOT_OBLIQUITY / 2.0).powi(2);
    let l0 = l0.to_radians();
    let m = m.to_radians();
    4.0 * (y * (2.0 * l0).sin() - 2.0 * e * m.sin() + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin())
    .to_degrees()
}

fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

fn cos_deg(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

fn tan_deg(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}
