//! Conversion between SI and scaled atomic units (SAU).
//!
//! Scaled atomic units are anchored to the driving wavelength λ. The unit of
//! time is λ/(2π c), so that the laser's angular frequency is 1 and one optical
//! period is 2π; the unit of energy is the photon energy ħω, which makes
//! energies read directly as harmonic orders. Lengths are then fixed by
//! requiring the free-electron kinetic energy to read p²/2 (Lewenstein et al.,
//! Phys. Rev. A **49**, 2117 (1994), eq. 23).
//!
//! All conversions are pure functions of the wavelength.

use std::{ f64::consts::PI, fmt, str::FromStr };
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::error::{ HhgError, HhgResult };

/// Speed of light in vacuum [m s⁻¹]
pub const c: f64 = 299792458.0;
/// Vacuum permittivity [F m⁻¹]
pub const eps0: f64 = 8.854187817e-12;
/// Elementary charge [C]
pub const e: f64 = 1.602176565e-19;
/// Electron mass [kg]
pub const m_e: f64 = 9.10938291e-31;
/// Reduced Planck constant [J s]
pub const hbar: f64 = 1.054571726e-34;
/// Planck constant [J s]
pub const h: f64 = 2.0 * PI * hbar;
/// Bohr radius [m]
pub const a0: f64 = 4.0 * PI * eps0 * hbar * hbar / m_e / (e * e);
/// Rydberg energy [J]
pub const Ry: f64 = m_e * e * e * e * e / 8.0 / (eps0 * eps0) / (h * h);

/// Names a physical quantity with a scaled atomic unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quantity {
    Time,
    Frequency,
    Energy,
    Charge,
    Length,
    Field,
    Dipole,
    Mass,
    Momentum,
}

impl Quantity {
    /// All quantities, in declaration order.
    pub const ALL: [Quantity; 9] = [
        Self::Time,
        Self::Frequency,
        Self::Energy,
        Self::Charge,
        Self::Length,
        Self::Field,
        Self::Dipole,
        Self::Mass,
        Self::Momentum,
    ];
}

/// Accepts both long names (`"energy"`) and the conventional short symbols
/// (`"U"`, `"E"`, `"d"`, ...).
impl FromStr for Quantity {
    type Err = HhgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "t" | "time" => Ok(Self::Time),
            "omega" | "frequency" => Ok(Self::Frequency),
            "U" | "energy" => Ok(Self::Energy),
            "q" | "charge" => Ok(Self::Charge),
            "s" | "length" => Ok(Self::Length),
            "E" | "field" => Ok(Self::Field),
            "d" | "dipole" => Ok(Self::Dipole),
            "m" | "mass" => Ok(Self::Mass),
            "p" | "momentum" => Ok(Self::Momentum),
            _ => Err(HhgError::UnknownQuantity(s.to_string())),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Time => "time",
            Self::Frequency => "frequency",
            Self::Energy => "energy",
            Self::Charge => "charge",
            Self::Length => "length",
            Self::Field => "field",
            Self::Dipole => "dipole",
            Self::Mass => "mass",
            Self::Momentum => "momentum",
        };
        write!(f, "{}", name)
    }
}

/// Target unit system of a conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    SI,
    SAU,
}

impl FromStr for Target {
    type Err = HhgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SI" => Ok(Self::SI),
            "SAU" => Ok(Self::SAU),
            _ => Err(HhgError::UnknownTarget(s.to_string())),
        }
    }
}

/// Scaled atomic units expressed in SI units for a particular wavelength.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Units {
    /// Time [s]
    pub t: f64,
    /// Angular frequency [s⁻¹]
    pub omega: f64,
    /// Energy [J]
    pub energy: f64,
    /// Charge [C]
    pub charge: f64,
    /// Length [m]
    pub length: f64,
    /// Electric field [V m⁻¹]
    pub field: f64,
    /// Dipole moment [C m]
    pub dipole: f64,
    /// Mass [kg]
    pub mass: f64,
    /// Momentum [kg m s⁻¹]
    pub momentum: f64,
}

impl Units {
    /// Compute the unit system for a driving wavelength in meters.
    pub fn from_wavelength(wavelength: f64) -> HhgResult<Self> {
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(HhgError::InvalidWavelength(wavelength));
        }
        let t = wavelength / c / (2.0 * PI);
        let omega = t.recip();
        let energy = hbar * omega;
        let charge = e;
        let length = a0 * (2.0 * Ry / energy).sqrt();
        let field = energy / charge / length;
        let dipole = charge * length;
        let mass = m_e;
        let momentum = mass * length / t;
        Ok(Self { t, omega, energy, charge, length, field, dipole, mass, momentum })
    }

    /// Return the SI value of one scaled atomic unit of `quantity`.
    pub fn get(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Time => self.t,
            Quantity::Frequency => self.omega,
            Quantity::Energy => self.energy,
            Quantity::Charge => self.charge,
            Quantity::Length => self.length,
            Quantity::Field => self.field,
            Quantity::Dipole => self.dipole,
            Quantity::Mass => self.mass,
            Quantity::Momentum => self.momentum,
        }
    }
}

/// Values that can be multiplied or divided by a unit factor.
pub trait Rescale {
    type Output;

    fn mul_unit(self, unit: f64) -> Self::Output;

    fn div_unit(self, unit: f64) -> Self::Output;
}

impl Rescale for f64 {
    type Output = f64;

    fn mul_unit(self, unit: f64) -> f64 { self * unit }

    fn div_unit(self, unit: f64) -> f64 { self / unit }
}

impl Rescale for C64 {
    type Output = C64;

    fn mul_unit(self, unit: f64) -> C64 { self * unit }

    fn div_unit(self, unit: f64) -> C64 { self / unit }
}

impl<D> Rescale for nd::Array<f64, D>
where D: nd::Dimension
{
    type Output = Self;

    fn mul_unit(self, unit: f64) -> Self { self.mapv_into(|x| x * unit) }

    fn div_unit(self, unit: f64) -> Self { self.mapv_into(|x| x / unit) }
}

impl<'a, D> Rescale for &'a nd::Array<f64, D>
where D: nd::Dimension
{
    type Output = nd::Array<f64, D>;

    fn mul_unit(self, unit: f64) -> Self::Output { self.mapv(|x| x * unit) }

    fn div_unit(self, unit: f64) -> Self::Output { self.mapv(|x| x / unit) }
}

impl<D> Rescale for nd::Array<C64, D>
where D: nd::Dimension
{
    type Output = Self;

    fn mul_unit(self, unit: f64) -> Self { self.mapv_into(|x| x * unit) }

    fn div_unit(self, unit: f64) -> Self { self.mapv_into(|x| x / unit) }
}

impl<'a, D> Rescale for &'a nd::Array<C64, D>
where D: nd::Dimension
{
    type Output = nd::Array<C64, D>;

    fn mul_unit(self, unit: f64) -> Self::Output { self.mapv(|x| x * unit) }

    fn div_unit(self, unit: f64) -> Self::Output { self.mapv(|x| x / unit) }
}

/// Convert `value` of a given `quantity` into the `target` unit system.
///
/// Conversion to SI multiplies by the matching unit; conversion to SAU
/// divides by it.
pub fn sau_convert<V>(
    value: V,
    quantity: Quantity,
    target: Target,
    wavelength: f64,
) -> HhgResult<V::Output>
where V: Rescale
{
    let unit = Units::from_wavelength(wavelength)?.get(quantity);
    match target {
        Target::SI => Ok(value.mul_unit(unit)),
        Target::SAU => Ok(value.div_unit(unit)),
    }
}

/// Convert an SI value to scaled atomic units.
pub fn to_sau<V>(value: V, quantity: Quantity, wavelength: f64)
    -> HhgResult<V::Output>
where V: Rescale
{
    sau_convert(value, quantity, Target::SAU, wavelength)
}

/// Convert a value in scaled atomic units to SI.
pub fn to_si<V>(value: V, quantity: Quantity, wavelength: f64)
    -> HhgResult<V::Output>
where V: Rescale
{
    sau_convert(value, quantity, Target::SI, wavelength)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn laser_frequency_is_unity() {
        let wavelength = 800e-9;
        let uu = Units::from_wavelength(wavelength).unwrap();
        let omega_laser = 2.0 * PI * c / wavelength;
        assert_relative_eq!(omega_laser / uu.omega, 1.0, max_relative = 1e-12);
        let period = to_sau(wavelength / c, Quantity::Time, wavelength).unwrap();
        assert_relative_eq!(period, 2.0 * PI, max_relative = 1e-12);
    }

    #[test]
    fn kinetic_energy_reads_p2_over_2() {
        let uu = Units::from_wavelength(1000e-9).unwrap();
        let ratio = uu.momentum * uu.momentum / uu.mass / uu.energy;
        assert_relative_eq!(ratio, 1.0, max_relative = 1e-9);
    }

    #[test]
    fn derived_constants() {
        assert_relative_eq!(a0, 5.2917721e-11, max_relative = 1e-7);
        assert_relative_eq!(Ry / e, 13.605692, max_relative = 1e-6);
    }

    #[test]
    fn short_and_long_names() {
        assert_eq!("E".parse::<Quantity>().unwrap(), Quantity::Field);
        assert_eq!("field".parse::<Quantity>().unwrap(), Quantity::Field);
        assert_eq!("U".parse::<Quantity>().unwrap(), Quantity::Energy);
        assert_eq!("omega".parse::<Quantity>().unwrap(), Quantity::Frequency);
        assert!(matches!(
            "velocity".parse::<Quantity>(),
            Err(HhgError::UnknownQuantity(_)),
        ));
        assert!(matches!(
            "CGS".parse::<Target>(),
            Err(HhgError::UnknownTarget(_)),
        ));
    }

    #[test]
    fn rejects_bad_wavelength() {
        assert_eq!(
            Units::from_wavelength(0.0),
            Err(HhgError::InvalidWavelength(0.0)),
        );
        assert!(to_sau(1.0, Quantity::Time, f64::NAN).is_err());
    }

    #[test]
    fn arrays_convert_elementwise() {
        let wavelength = 1000e-9;
        let uu = Units::from_wavelength(wavelength).unwrap();
        let x = nd::array![1.0, -2.0, 3.5];
        let y = to_si(&x, Quantity::Field, wavelength).unwrap();
        assert_eq!(y, x.mapv(|xk| xk * uu.field));
        let z = nd::array![C64::new(0.0, 1.0)];
        let w = to_si(z, Quantity::Dipole, wavelength).unwrap();
        assert_eq!(w[0], C64::new(0.0, uu.dipole));
    }
}
