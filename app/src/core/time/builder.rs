#[macro_export]
macro_rules! t {
    (now) => {{
        $crate::core::time::DateTime::now()
    }};

    ($amount:literal millis) => {{
        $crate::core::time::Duration::millis($amount)
    }};
    ($amount:literal seconds) => {{
        $crate::core::time::Duration::seconds($amount)
    }};
    ($amount:literal minutes) => {{
        $crate::core::time::Duration::minutes($amount)
    }};

    ($amount:literal seconds ago) => {{
        t!(now) - t!($amount seconds)
    }};
    ($amount:literal minutes ago) => {{
        t!(now) - t!($amount minutes)
    }};
}
