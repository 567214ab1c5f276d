//! Wall clock for token expiry checks.

use std::rc::Rc;

use portal::auth::Clock;

/// Current time in Unix seconds.
#[allow(clippy::cast_possible_truncation)]
pub fn now_unix() -> i64 {
    #[cfg(feature = "csr")]
    {
        (js_sys::Date::now() / 1000.0).floor() as i64
    }
    #[cfg(not(feature = "csr"))]
    {
        portal::claims::system_now()
    }
}

/// Clock handed to the auth context.
pub fn browser_clock() -> Clock {
    Rc::new(now_unix)
}
