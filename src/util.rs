/// Checks that a numerical value is in the provided interval and returns early with
/// [`Error::InvalidParameter`](crate::Error::InvalidParameter) if not
///
/// The interval is closed (`[a,b]`) by default. Prefix the lower bound with `open` for `(a,b]`.
///
/// ### Example
/// ```ignore
/// let alpha = 0.0;
/// check_interval!(alpha, open 0.0, 1.0);
/// ```
/// This returns an error with the message "invalid value 0 for \`alpha\`; must be in the interval (0, 1]".
///
/// `NaN` is never in any interval.
#[macro_export]
macro_rules! check_interval {
    ($var:expr, open $a:expr, $b:expr) => {
        if !($var > $a && $var <= $b) {
            return Err($crate::Error::InvalidParameter {
                name: stringify!($var),
                value: f64::from($var),
                interval: format!("({}, {}]", $a, $b),
            });
        }
    };
    ($var:expr, $a:expr, $b:expr) => {
        if !($var >= $a && $var <= $b) {
            return Err($crate::Error::InvalidParameter {
                name: stringify!($var),
                value: f64::from($var),
                interval: format!("[{}, {}]", $a, $b),
            });
        }
    };
}
