/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

//! Test attribute for Symposium.
//!
//! `#[symposium_test]` turns an `async fn` into a regular `#[test]` that runs on
//! a dedicated multi-threaded Tokio runtime. Philosophers and the monitor are
//! spawned as separate tasks, so a current-thread runtime would serialize them
//! and distort the timings these tests depend on.

use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Runs the annotated `async fn` on a fresh multi-threaded runtime.
///
/// Panics raised on any runtime thread are captured and re-raised from the test
/// thread with their location, so a panic inside a spawned philosopher task
/// fails the test instead of being swallowed by the `JoinHandle`. Only panics
/// raised on this test's own threads are attributed to it.
#[proc_macro_attribute]
pub fn symposium_test(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let vis = &input.vis;
    let sig = &input.sig;
    let body = &input.block;
    let attrs = &input.attrs;
    let name = &sig.ident;
    let inputs = &sig.inputs;
    let output = &sig.output;

    let async_name = syn::Ident::new(&format!("__{name}_async"), name.span());

    let output = quote! {
        #[test]
        #(#attrs)*
        #vis fn #name() {
            use std::sync::Arc;

            use ::symposium_test::panic_capture::{self, CapturedPanic};

            panic_capture::install();
            let capture = Arc::new(CapturedPanic::default());
            panic_capture::attach(&capture);

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .on_thread_start({
                    let capture = Arc::clone(&capture);
                    move || panic_capture::attach(&capture)
                })
                .build()
                .unwrap();

            let result = runtime.block_on(async {
                let test_span = tracing::info_span!("symposium_test", name = stringify!(#name));
                let _enter = test_span.enter();

                #async_name().await
            });
            drop(runtime);
            panic_capture::detach();

            if let Some((location, message)) = capture.first() {
                panic!("Panic at {}: {}", location, message);
            }

            result.unwrap()
        }

        async fn #async_name(#inputs) #output #body
    };

    output.into()
}
