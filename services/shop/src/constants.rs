// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Defaults of the open API.
pub const DEFAULT_API_ROOT: &str = "https://open-api.tiktokglobalshop.com";
pub const DEFAULT_AUTH_ROOT: &str = "https://auth.tiktok-shops.com";
pub const DEFAULT_VERSION: &str = "202309";
pub const DEFAULT_LOCALE: &str = "en-US";

// Headers used by the open API.
pub const X_TTS_ACCESS_TOKEN: &str = "x-tts-access-token";

// Query keys written by the request builder.
pub const ACCESS_TOKEN: &str = "access_token";
pub const APP_KEY: &str = "app_key";
pub const APP_SECRET: &str = "app_secret";
pub const SHOP_CIPHER: &str = "shop_cipher";
pub const SHOP_ID: &str = "shop_id";
pub const VERSION: &str = "version";
pub const TIMESTAMP: &str = "timestamp";
pub const SIGN: &str = "sign";
pub const LOCALE: &str = "locale";

// Env values used to configure the client.
pub const TIKTOK_SHOP_APP_KEY: &str = "TIKTOK_SHOP_APP_KEY";
pub const TIKTOK_SHOP_APP_SECRET: &str = "TIKTOK_SHOP_APP_SECRET";
pub const TIKTOK_SHOP_ACCESS_TOKEN: &str = "TIKTOK_SHOP_ACCESS_TOKEN";
pub const TIKTOK_SHOP_SHOP_ID: &str = "TIKTOK_SHOP_SHOP_ID";
pub const TIKTOK_SHOP_SHOP_CIPHER: &str = "TIKTOK_SHOP_SHOP_CIPHER";
pub const TIKTOK_SHOP_API_ROOT: &str = "TIKTOK_SHOP_API_ROOT";
pub const TIKTOK_SHOP_VERSION: &str = "TIKTOK_SHOP_VERSION";
pub const TIKTOK_SHOP_LOCALE: &str = "TIKTOK_SHOP_LOCALE";

/// AsciiSet for a single path segment.
///
/// Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static PATH_SEGMENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
