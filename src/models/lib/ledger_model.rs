/// Wraps a model struct with the getters, setters, builder, and serde impls
/// every registry record shares, and appends the `created`/`updated`
/// timestamps.
///
/// Records don't carry an `exists` flag. A record exists exactly when its
/// table holds it.
macro_rules! ledger_model {
    (
        $(#[$struct_meta:meta])*
        pub struct $name:ident {
            $($fields:tt)*
        }
        $builder:ident

    ) => {
        $(#[$struct_meta])*
        #[derive(Clone, Debug, PartialEq, getset::Getters, getset::Setters, derive_builder::Builder, serde::Serialize, serde::Deserialize)]
        #[builder(pattern = "owned", setter(into))]
        #[getset(get = "pub", set = "pub(crate)")]
        pub struct $name {
            $($fields)*
            created: chrono::DateTime<chrono::Utc>,
            updated: chrono::DateTime<chrono::Utc>,
        }

        impl $name {
            pub fn builder() -> $builder {
                $builder::default()
            }
        }
    }
}
