use crate::{GeneratedUnit, Operation};
use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, format_ident, quote};

/// Renders the unit as the body of a Rust module made of constants.
///
/// ```ignore
/// pub const TABLE: &str = "user";
/// pub const CREATE_TABLE: &str = "CREATE TABLE `user` (..)";
/// pub const DROP_TABLE: &str = "DROP TABLE IF EXISTS `user`";
/// pub const INSERT: &str = "INSERT INTO `user` (`name`) VALUES (?)";
/// // one constant per operation
/// pub const DECODE: &[(&str, ::quarry::DecodeFn)] = &[("id", ::quarry::DecodeFn::Integer), ..];
/// ```
impl ToTokens for GeneratedUnit {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let table = &self.table;
        let create_table = &self.create_table;
        let drop_table = &self.drop_table;
        let statements = Operation::ALL.into_iter().map(|operation| {
            let name = format_ident!("{}", operation.name().to_uppercase());
            let sql = &self.statement(operation).sql;
            quote! { pub const #name: &str = #sql; }
        });
        let decode = self.decode_plan.steps.iter().map(|step| {
            let column = &step.column;
            let decode = step.decode;
            quote! { (#column, #decode) }
        });
        tokens.append_all(quote! {
            pub const TABLE: &str = #table;
            pub const CREATE_TABLE: &str = #create_table;
            pub const DROP_TABLE: &str = #drop_table;
            #(#statements)*
            pub const DECODE: &[(&str, ::quarry::DecodeFn)] = &[#(#decode),*];
        });
    }
}
