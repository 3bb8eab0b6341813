use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, Visibility};

/// Derive macro for graph result scan targets.
///
/// Implements `graph_result::Record` on the annotated struct:
///
/// - `fields() -> &'static [FieldInfo]` — name, raw tag and visibility of every
///   named field, in declaration order.
/// - `slot(&mut self, position) -> FieldSlot<'_>` — typed mutable access to the
///   field at `position`.
///
/// Which fields actually bind is decided at runtime by the spec cache: a field
/// needs a non-empty tag whose key is not `-`, and it must be `pub`.
///
/// # Example
///
/// ```ignore
/// #[derive(Record, Default)]
/// pub struct Pod {
///     #[graph("id")]
///     pub id: String,
///
///     #[graph("ts,omitempty")]
///     pub ts: i64,
///
///     #[graph("p")]
///     pub node: Option<Node>,
/// }
/// ```
///
/// A field binds when its type implements `graph_result::Bindable`: `bool`,
/// signed and unsigned integers, `f32`, `f64`, `String`, `Node`, `Edge`, and
/// `Option<_>` / `Box<_>` around any of them, including through type aliases.
/// Any other field type still compiles; scanning a column into it reports an
/// unsupported field.
#[proc_macro_derive(Record, attributes(graph))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let name = &input.ident;
    let name_str = name.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(name, "Record only supports structs"))
        }
    };

    let mut info_tokens = Vec::new();
    let mut slot_tokens = Vec::new();

    for (position, field) in fields.iter().enumerate() {
        let field_name = field.ident.as_ref().ok_or_else(|| {
            syn::Error::new_spanned(field, "expected named field")
        })?;
        let field_name_str = field_name.to_string();
        let field_ty = &field.ty;

        // Parse #[graph("key,modifier...")].
        let mut tag: Option<String> = None;
        for attr in &field.attrs {
            if !attr.path().is_ident("graph") {
                continue;
            }
            if tag.is_some() {
                return Err(syn::Error::new_spanned(
                    attr,
                    "duplicate #[graph(...)] attribute",
                ));
            }
            let value: LitStr = attr.parse_args()?;
            tag = Some(value.value());
        }
        let tag = tag.unwrap_or_default();

        let public = matches!(field.vis, Visibility::Public(_));

        info_tokens.push(quote! {
            ::graph_result::record::FieldInfo {
                name: #field_name_str,
                tag: #tag,
                public: #public,
            }
        });

        // Trait resolution picks the kind, so aliases bind like their target.
        let ty_str = quote!(#field_ty).to_string().replace(' ', "");
        let slot_expr = quote! {
            {
                use ::graph_result::record::__private::{BindableField as _, OpaqueField as _};
                ::graph_result::record::__private::FieldRef {
                    field: &mut self.#field_name,
                    ty: #ty_str,
                }
                .into_field_slot()
            }
        };
        slot_tokens.push(quote! { #position => #slot_expr, });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::graph_result::record::Record for #name #ty_generics #where_clause {
            fn record_name() -> &'static str {
                #name_str
            }

            fn fields() -> &'static [::graph_result::record::FieldInfo] {
                const FIELDS: &[::graph_result::record::FieldInfo] = &[
                    #(#info_tokens),*
                ];
                FIELDS
            }

            fn slot(&mut self, position: usize) -> ::graph_result::record::FieldSlot<'_> {
                match position {
                    #(#slot_tokens)*
                    _ => ::graph_result::record::FieldSlot::Unsupported("<no such field>"),
                }
            }
        }
    };

    Ok(TokenStream::from(expanded))
}
