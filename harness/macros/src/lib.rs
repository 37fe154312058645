use darling::ast::NestedMeta;
use darling::{Error, FromMeta};
use proc_macro::TokenStream;
use quote::quote;

#[derive(Debug, FromMeta)]
struct BenchMacroArgs {
    #[darling(default)]
    name: Option<String>,
    #[darling(default)]
    args: Option<syn::Path>,
}

/// Annotation for a benchmark run routine.
///
/// The annotated function is replaced by a function of the same name that
/// builds the [`BenchmarkCase`](../libcbench/struct.BenchmarkCase.html) for it,
/// ready to be added to a registry. The routine itself takes the run
/// [`State`](../libcbench/struct.State.html) and, for parameterized cases, the
/// argument, and returns `libcbench::Result<()>`.
///
/// `args` names a function returning `libcbench::Result<ArgumentSweep>`; one run
/// is made per value in that sweep. `name` overrides the case name, which
/// defaults to the function name.
///
/// # Example
///
/// ```rust
/// use libcbench::{bench, ArgumentSweep, BenchmarkRegistry, State};
///
/// fn sizes() -> libcbench::Result<ArgumentSweep> {
///     ArgumentSweep::builder().add(8).add(64).build()
/// }
///
/// #[bench(args = sizes)]
/// fn fill(state: &mut State, nbytes: usize) -> libcbench::Result<()> {
///     // Untimed setup
///     let mut buf = vec![0u8; nbytes];
///     for _ in 0..state.iterations() {
///         state.start_timing()?;
///         buf.fill(1);
///         state.stop_timing_with_sample()?;
///     }
///     state.observe(&buf);
///     Ok(())
/// }
///
/// #[bench(name = "nothing")]
/// fn idle(state: &mut State) -> libcbench::Result<()> {
///     for _ in 0..state.iterations() {
///         state.time(|| ())?;
///     }
///     Ok(())
/// }
///
/// let mut registry = BenchmarkRegistry::new();
/// registry.add(fill().unwrap()).unwrap();
/// registry.add(idle().unwrap()).unwrap();
/// assert_eq!(registry.runs().count(), 3);
/// ```
#[proc_macro_attribute]
pub fn bench(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut input = syn::parse_macro_input!(item as syn::ItemFn);
    let attr_args = match NestedMeta::parse_meta_list(attr.into()) {
        Ok(v) => v,
        Err(e) => {
            return TokenStream::from(Error::from(e).write_errors());
        }
    };
    let args = match BenchMacroArgs::from_list(&attr_args) {
        Ok(v) => v,
        Err(e) => {
            return TokenStream::from(e.write_errors());
        }
    };
    let vis = std::mem::replace(&mut input.vis, syn::Visibility::Inherited);
    let ident = input.sig.ident.clone();
    let name = args.name.unwrap_or_else(|| ident.to_string());
    let inputs = input.sig.inputs.len();
    let case = match (&args.args, inputs) {
        (Some(sweep), 2) => quote! {
            ::libcbench::BenchmarkCase::with_arg(#name, #sweep()?, #ident)
        },
        (None, 1) => quote! {
            ::libcbench::BenchmarkCase::no_arg(#name, #ident)
        },
        (Some(_), _) => {
            return syn::Error::new_spanned(
                &input.sig,
                "a benchmark with `args` takes `(state, argument)`",
            )
            .to_compile_error()
            .into();
        }
        (None, _) => {
            return syn::Error::new_spanned(
                &input.sig,
                "a benchmark without `args` takes only `(state)`",
            )
            .to_compile_error()
            .into();
        }
    };
    let result = quote! {
        #vis fn #ident() -> ::libcbench::Result<::libcbench::BenchmarkCase> {
            #input

            #case
        }
    };
    result.into()
}
