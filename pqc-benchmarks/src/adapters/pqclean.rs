//! PQClean signature schemes.
//!
//! Thin `SignatureScheme` wrappers over the `pqcrypto` bindings. Every
//! PQClean signature module exposes the same free functions, so one macro
//! covers them all.

use super::signature::SignatureScheme;

macro_rules! pqclean_scheme {
    ($(#[$doc:meta])* $ty:ident, $name:literal, $description:literal, $($module:ident)::+) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl SignatureScheme for $ty {
            type PublicKey = $($module)::+::PublicKey;
            type SecretKey = $($module)::+::SecretKey;
            type Signature = $($module)::+::DetachedSignature;

            fn name(&self) -> &'static str {
                $name
            }

            fn description(&self) -> &'static str {
                $description
            }

            fn keypair(&self) -> (Self::PublicKey, Self::SecretKey) {
                $($module)::+::keypair()
            }

            fn sign(&self, message: &[u8], secret_key: &Self::SecretKey) -> Self::Signature {
                $($module)::+::detached_sign(message, secret_key)
            }

            fn verify(
                &self,
                signature: &Self::Signature,
                message: &[u8],
                public_key: &Self::PublicKey,
            ) -> bool {
                $($module)::+::verify_detached_signature(signature, message, public_key).is_ok()
            }
        }
    };
}

pqclean_scheme!(
    /// CRYSTALS-Dilithium, NIST security level 2
    Dilithium2,
    "Dilithium2",
    "CRYSTALS-Dilithium level 2 keygen/sign/verify",
    pqcrypto_dilithium::dilithium2
);

pqclean_scheme!(
    /// CRYSTALS-Dilithium, NIST security level 3
    Dilithium3,
    "Dilithium3",
    "CRYSTALS-Dilithium level 3 keygen/sign/verify",
    pqcrypto_dilithium::dilithium3
);

pqclean_scheme!(
    /// CRYSTALS-Dilithium, NIST security level 5
    Dilithium5,
    "Dilithium5",
    "CRYSTALS-Dilithium level 5 keygen/sign/verify",
    pqcrypto_dilithium::dilithium5
);

pqclean_scheme!(
    /// Falcon with n = 512
    Falcon512,
    "Falcon-512",
    "Falcon-512 keygen/sign/verify",
    pqcrypto_falcon::falcon512
);
