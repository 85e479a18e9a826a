use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{self, Ident, ImplItemFn};

/// This macro is added before a method of `Round` struct in the impl block.
/// Use this macro to first check if current round phase is exactly the phase in
/// the attribute.
///
/// For example, `#[allowed_phase(PlayerTurns)]` will make a method first check
/// if current round phase is `PlayerTurns`. If not, the method will return
/// `RoundError::WrongPhase`.
///
/// `RoundPhase` and `RoundError` must be in scope where the macro is used, and
/// the method must return `Result<_, RoundError>`.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let phase: Ident = match syn::parse(attr) {
        Ok(phase) => phase,
        Err(err) => return err.to_compile_error().into(),
    };
    let mut ast: ImplItemFn = match syn::parse(item) {
        Ok(ast) => ast,
        Err(err) => return err.to_compile_error().into(),
    };
    let operation = ast.sig.ident.to_string();
    let early_return: syn::Stmt = match syn::parse2(phase_guard(&phase, &operation)) {
        Ok(stmt) => stmt,
        Err(err) => return err.to_compile_error().into(),
    };
    ast.block.stmts.insert(0, early_return);
    ast.into_token_stream().into()
}

fn phase_guard(phase: &Ident, operation: &str) -> TokenStream2 {
    quote! {
        if self.phase != RoundPhase::#phase {
            return Err(RoundError::WrongPhase {
                operation: #operation,
                expected: RoundPhase::#phase,
                actual: self.phase,
            });
        }
    }
}
