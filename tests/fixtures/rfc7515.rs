// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0
[
  // https://tools.ietf.org/html/rfc7515#appendix-A.1
  TestVector {
    alg: "HS256",
    header: br#"{"typ":"JWT","alg":"HS256"}"#,
    claims: b"{\"iss\":\"joe\",\r\n \"exp\":1300819380,\r\n \"http://example.com/is_root\":true}",
    key: r#"
      {
        "kty": "oct",
        "k": "AyM1SysPpbyDfgZld3umj1qzKObwVMkoqQ-EstJQLr_T-1qS0gZH75aKtMN3Yj0iPS4hcgUuTwjAzZr1Z9CAow"
      }
    "#,
  },
]
