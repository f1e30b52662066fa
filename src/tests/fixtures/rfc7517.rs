// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0
[
  // https://tools.ietf.org/html/rfc7517#appendix-A.1
  TestVector::Key {
    json: r#"
      {
        "kty": "EC",
        "crv": "P-256",
        "x": "MKBCTNIcKUSDii11ySs3526iDZ8AiTo7Tu6KPAqv7D4",
        "y": "4Etl6SRW2YiLUrN5vfvVHuhp7x8PxltmWWlbbM4IFGU",
        "use": "enc",
        "kid": "1"
      }
    "#,
  },
  // https://tools.ietf.org/html/rfc7517#appendix-A.3
  TestVector::KeySet {
    json: r#"
      {
        "keys": [
          {
            "kty": "oct",
            "alg": "A128KW",
            "k": "GawgguFyGrWKav7AX4VKUg"
          },
          {
            "kty": "oct",
            "k": "AyM1SysPpbyDfgZld3umj1qzKObwVMkoqQ-EstJQLr_T-1qS0gZH75aKtMN3Yj0iPS4hcgUuTwjAzZr1Z9CAow",
            "kid": "HMAC key used in JWS A.1 example"
          }
        ]
      }
    "#,
  },
]
