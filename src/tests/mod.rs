// Copyright 2020-2026 JOSE Core Contributors
// SPDX-License-Identifier: Apache-2.0

mod es256;
mod jwe_roundtrip;
mod rfc8037;
