use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::punctuated::Punctuated;
use syn::{
    Generics, Ident, Item, LitStr, Result, Token, Type, parse::Parse, parse::ParseStream,
    parse_macro_input, parse_quote,
};

/// #[event] 宏实现
/// - 仅支持 struct / enum
/// - 生成 `::legion_events::Event` 实现（event_name / supertypes）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EventAttrConfig);
    let input = parse_macro_input!(item as Item);

    let (ident, generics) = match &input {
        Item::Struct(s) => (&s.ident, &s.generics),
        Item::Enum(e) => (&e.ident, &e.generics),
        other => {
            return syn::Error::new_spanned(
                other,
                "#[event] can only be used on struct or enum types",
            )
            .to_compile_error()
            .into();
        }
    };

    if let Some(lt) = generics.lifetimes().next() {
        return syn::Error::new_spanned(
            lt,
            "#[event] types must be 'static; lifetime parameters are not supported",
        )
        .to_compile_error()
        .into();
    }

    let generics = with_static_bounds(generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let supertypes = cfg.extends.iter().map(|ty| {
        quote! { ::legion_events::Supertype::of::<#ty>(|e| e) }
    });

    let name_fn = cfg.name.map(|lit| {
        quote! {
            fn event_name() -> &'static str {
                #lit
            }
        }
    });

    let out = quote! {
        #input

        impl #impl_generics ::legion_events::Event for #ident #ty_generics #where_clause {
            #name_fn

            fn supertypes() -> ::std::vec::Vec<::legion_events::Supertype<Self>> {
                ::std::vec![ #( #supertypes ),* ]
            }
        }
    };

    TokenStream::from(out)
}

// 事件必须满足 'static，为每个类型参数追加约束
fn with_static_bounds(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }
    generics
}

// 解析 event 宏参数：extends(<Type>, ...)、name = "<str>"
struct EventAttrConfig {
    extends: Vec<Type>,
    name: Option<LitStr>,
}

impl Parse for EventAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut extends: Option<Vec<Type>> = None;
        let mut name: Option<LitStr> = None;

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            match key.to_string().as_str() {
                "extends" => {
                    if extends.is_some() {
                        return Err(syn::Error::new(
                            key.span(),
                            "duplicate key 'extends' in attribute",
                        ));
                    }
                    let content;
                    syn::parenthesized!(content in input);
                    let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                    extends = Some(dedup_types(types)?);
                }
                "name" => {
                    if name.is_some() {
                        return Err(syn::Error::new(
                            key.span(),
                            "duplicate key 'name' in attribute",
                        ));
                    }
                    input.parse::<Token![=]>()?;
                    let lit: LitStr = input.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "event name must not be empty"));
                    }
                    name = Some(lit);
                }
                _ => {
                    return Err(syn::Error::new(
                        key.span(),
                        "unknown key; expected 'extends' | 'name'",
                    ));
                }
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(Self {
            extends: extends.unwrap_or_default(),
            name,
        })
    }
}

// 同一父类型重复声明会导致监听器被重复适配，这里直接报错
fn dedup_types(types: Punctuated<Type, Token![,]>) -> Result<Vec<Type>> {
    let mut seen = std::collections::HashSet::<String>::new();
    let mut out = Vec::new();
    for ty in types {
        let key = ty.to_token_stream().to_string();
        if !seen.insert(key) {
            return Err(syn::Error::new_spanned(&ty, "duplicate type in 'extends'"));
        }
        out.push(ty);
    }
    Ok(out)
}
