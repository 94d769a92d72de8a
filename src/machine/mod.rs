//! Machine characteristics of floating-point arithmetic (Cody, 1988).
//!
//! Every parameter is discovered by running arithmetic on values built at
//! runtime, so the same procedure characterizes binary and decimal
//! representations alike. The loops terminate because each one moves a
//! magnitude monotonically towards a bound imposed by the finite exponent
//! range of the representation; no iteration cap is applied.

mod arith;

#[cfg(test)]
mod decimal;

pub use arith::Arithmetic;

/// Parameters of a floating-point representation.
///
/// Field names follow Cody's MACHAR routine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MachineParams<T = f64> {
    /// Radix of the representation.
    pub ibeta: i32,
    /// Number of base-`ibeta` digits in the significand.
    pub it: i32,
    /// Rounding classification: 0 if results are chopped, 1 if they are
    /// rounded in a non-IEEE manner, 2 for IEEE round-to-nearest. Three is
    /// added when underflow is gradual.
    pub irnd: i32,
    /// Number of guard digits kept when multiplying.
    pub ngrd: i32,
    /// Largest negative integer such that `1 + ibeta^machep != 1`.
    pub machep: i32,
    /// Largest negative integer such that `1 - ibeta^negep != 1`.
    pub negep: i32,
    /// Width of the exponent field, in radix digits.
    pub iexp: i32,
    /// Largest-magnitude negative integer such that `ibeta^minexp` is
    /// normalized.
    pub minexp: i32,
    /// Smallest positive power of `ibeta` that overflows.
    pub maxexp: i32,
    pub eps: T,
    pub epsneg: T,
    /// Smallest positive normalized power of the radix.
    pub xmin: T,
    /// Largest finite value.
    pub xmax: T,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Chop,
    Round,
    Ieee,
}

impl<T> MachineParams<T> {
    pub fn rounding(&self) -> Rounding {
        match self.irnd % 3 {
            0 => Rounding::Chop,
            1 => Rounding::Round,
            _ => Rounding::Ieee,
        }
    }

    /// Whether values below `xmin` lose precision gradually instead of
    /// flushing to zero.
    pub fn partial_underflow(&self) -> bool {
        self.irnd >= 3
    }

    /// Natural logarithm of the radix.
    pub fn ln_beta(&self) -> f64 {
        f64::from(self.ibeta).ln()
    }
}

/// Determines the characteristics of the arithmetic implemented by `T`.
///
/// # Examples
///
/// ```
/// # use elefunt::machine;
/// #
/// let params = machine::probe::<f64>();
///
/// assert_eq!((params.ibeta, params.it), (2, 53));
/// assert_eq!(params.xmax, f64::MAX);
/// ```
pub fn probe<T: Arithmetic>() -> MachineParams<T> {
    let one = T::ONE;

    let (a, ibeta) = radix::<T>();
    let beta = T::from_i32(ibeta);

    let it = precision(beta);
    let irnd = rounding(a, beta);

    let epsilons = epsilons(beta, it);
    let ngrd = guard_digits(irnd, epsilons.eps);

    let range = exponent_range(ibeta, it, irnd, epsilons.eps);
    let irnd = if range.partial_underflow { irnd + 3 } else { irnd };

    let mut xmax = one - epsilons.epsneg;

    if xmax * one != xmax {
        xmax = one - beta * epsilons.epsneg;
    }

    xmax = xmax / (beta * beta * beta * range.xmin);

    for _ in 0..(range.maxexp + range.minexp + 3) {
        xmax = if ibeta == 2 { xmax + xmax } else { xmax * beta };
    }

    let params = MachineParams {
        ibeta,
        it,
        irnd,
        ngrd,
        machep: epsilons.machep,
        negep: epsilons.negep,
        iexp: range.iexp,
        minexp: range.minexp,
        maxexp: range.maxexp,
        eps: epsilons.eps,
        epsneg: epsilons.epsneg,
        xmin: range.xmin,
        xmax,
    };

    if let Some(declared) = T::MANTISSA_DIGITS {
        if ibeta == 2 && u32::try_from(it).ok() != Some(declared) {
            log::warn!(
                "probed {it} significand digits but the type declares \
                 {declared}; intermediate results may carry extra precision \
                 and the rounding classification may be unreliable"
            );
        }
    }

    log::debug!("probed machine parameters: {params:?}");

    params
}

/// Finds the radix, returning it together with the first power of two `a`
/// at which adding one is absorbed by rounding.
fn radix<T: Arithmetic>() -> (T, i32) {
    let zero = T::ZERO;
    let one = T::ONE;

    let mut a = one;

    while ((a + one) - a) - one == zero {
        a = a + a;
    }

    let mut b = one;

    let ibeta = loop {
        b = b + b;

        let step = ((a + b) - a).trunc_to_i32();

        if step != 0 {
            break step;
        }
    };

    (a, ibeta)
}

fn precision<T: Arithmetic>(beta: T) -> i32 {
    let zero = T::ZERO;
    let one = T::ONE;

    let mut it = 0;
    let mut b = one;

    loop {
        it += 1;
        b = b * beta;

        if ((b + one) - b) - one != zero {
            return it;
        }
    }
}

/// Classifies rounding by adding half a unit in the last place of `a`, the
/// smallest power of two whose unit exceeds one.
fn rounding<T: Arithmetic>(a: T, beta: T) -> i32 {
    let zero = T::ZERO;
    let betah = beta / (T::ONE + T::ONE);

    if (a + betah) - a != zero {
        return 1;
    }

    let tempa = a + beta;

    if (tempa + betah) - tempa != zero {
        2
    } else {
        0
    }
}

struct Epsilons<T> {
    negep: i32,
    epsneg: T,
    machep: i32,
    eps: T,
}

fn epsilons<T: Arithmetic>(beta: T, it: i32) -> Epsilons<T> {
    let zero = T::ZERO;
    let one = T::ONE;
    let betain = one / beta;

    let mut start = one;

    for _ in 0..(it + 3) {
        start = start * betain;
    }

    let mut negep = it + 3;
    let mut epsneg = start;

    while (one - epsneg) - one == zero {
        epsneg = epsneg * beta;
        negep -= 1;
    }

    let mut machep = -it - 3;
    let mut eps = start;

    while (one + eps) - one == zero {
        eps = eps * beta;
        machep += 1;
    }

    Epsilons {
        negep: -negep,
        epsneg,
        machep,
        eps,
    }
}

fn guard_digits<T: Arithmetic>(irnd: i32, eps: T) -> i32 {
    let one = T::ONE;

    i32::from(irnd == 0 && (one + eps) * one - one != T::ZERO)
}

struct ExponentRange<T> {
    iexp: i32,
    minexp: i32,
    maxexp: i32,
    xmin: T,
    partial_underflow: bool,
}

/// Determines the exponent range. `irnd` is the rounding classification
/// before any adjustment for partial underflow.
fn exponent_range<T: Arithmetic>(
    ibeta: i32,
    it: i32,
    irnd: i32,
    eps: T,
) -> ExponentRange<T> {
    let zero = T::ZERO;
    let one = T::ONE;
    let beta = T::from_i32(ibeta);
    let betain = one / beta;
    let t = one + eps;

    // Largest i and k = 2^i such that (1/beta)^(2^i) does not underflow.
    let mut i = 0;
    let mut k = 1;
    let mut z = betain;
    let mut y;

    loop {
        y = z;
        z = y * y;

        let a = z * one;

        if a + a == zero || z.abs() >= y {
            break;
        }

        if ((z * t) * betain) * beta == z {
            break;
        }

        i += 1;
        k += k;
    }

    let (mut iexp, mut mx) = if ibeta == 10 {
        let mut iexp = 2;
        let mut iz = ibeta;

        while k >= iz {
            iz *= ibeta;
            iexp += 1;
        }

        (iexp, iz + iz - 1)
    } else {
        (i + 1, k + k)
    };

    // Step below the last square one power of the radix at a time.
    let mut xmin;
    let mut partial_underflow = false;

    let last = loop {
        xmin = y;
        y = y * betain;

        let a = y * one;
        let temp = y * t;

        if a + a == zero || y.abs() >= xmin {
            break a;
        }

        k += 1;

        if (temp * betain) * beta == y && temp != y {
            partial_underflow = true;
            xmin = y;

            break a;
        }
    };

    let minexp = -k;

    if mx <= k + k - 3 && ibeta != 10 {
        mx += mx;
        iexp += 1;
    }

    let mut maxexp = mx + minexp;
    let irnd = if partial_underflow { irnd + 3 } else { irnd };

    match irnd {
        2 | 5 => maxexp -= 2,
        3 | 4 => maxexp -= it,
        _ => {}
    }

    let sum = maxexp + minexp;

    if ibeta == 2 && sum == 0 {
        maxexp -= 1;
    }

    if sum > 20 {
        maxexp -= 1;
    }

    if last != y {
        maxexp -= 2;
    }

    ExponentRange {
        iexp,
        minexp,
        maxexp,
        xmin,
        partial_underflow,
    }
}
